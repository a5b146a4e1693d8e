// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Datasets: indexable sources of samples.

use lazy_backend::Framework;
use std::ops::Range;

/// A random-access collection of samples.
///
/// Loaders never inspect the samples; they only index into the dataset and
/// pass what they get to the collate function.
pub trait Dataset: Send + Sync {
    type Item: Clone + Send;

    /// Number of samples.
    fn len(&self) -> usize;

    /// Sample at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Framework this dataset was produced by, if it declares one.
    fn origin(&self) -> Option<Framework> {
        None
    }
}

impl<T: Clone + Send + Sync> Dataset for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }
}

/// The integers of a half-open range, one sample per integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeDataset {
    range: Range<usize>,
}

impl RangeDataset {
    pub fn new(range: Range<usize>) -> Self {
        Self { range }
    }
}

impl Dataset for RangeDataset {
    type Item = usize;

    fn len(&self) -> usize {
        self.range.len()
    }

    fn get(&self, index: usize) -> Option<usize> {
        (index < self.range.len()).then(|| self.range.start + index)
    }
}

/// A dataset annotated with the framework it came from.
#[derive(Debug, Clone)]
pub struct TaggedDataset<D> {
    inner: D,
    origin: Framework,
}

impl<D: Dataset> TaggedDataset<D> {
    pub fn new(inner: D, origin: Framework) -> Self {
        Self { inner, origin }
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Dataset> Dataset for TaggedDataset<D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<D::Item> {
        self.inner.get(index)
    }

    fn origin(&self) -> Option<Framework> {
        Some(self.origin)
    }
}
