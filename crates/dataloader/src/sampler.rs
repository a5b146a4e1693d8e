// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sample ordering.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Order in which sample indices are drawn within one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sampler {
    /// `0, 1, .., len - 1`.
    #[default]
    Sequential,
    /// A fresh permutation every epoch, reproducible from `seed`.
    Random { seed: u64 },
    /// Exactly these indices, in this order, every epoch.
    Indices(Vec<usize>),
}

impl Sampler {
    /// Indices for epoch number `epoch` over a dataset of `len` samples.
    pub fn indices(&self, len: usize, epoch: u64) -> Vec<usize> {
        match self {
            Self::Sequential => (0..len).collect(),
            Self::Random { seed } => {
                let mut order: Vec<usize> = (0..len).collect();
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(epoch));
                order.shuffle(&mut rng);
                order
            }
            Self::Indices(indices) => indices.clone(),
        }
    }
}

/// Precomputed groups of indices, one group per batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSampler(pub Vec<Vec<usize>>);

impl BatchSampler {
    /// Groups `sampler`'s epoch-0 order into chunks of `batch_size`.
    pub fn chunked(sampler: &Sampler, len: usize, batch_size: usize) -> Self {
        let order = sampler.indices(len, 0);
        Self(order.chunks(batch_size.max(1)).map(<[usize]>::to_vec).collect())
    }

    pub fn batches(&self) -> &[Vec<usize>] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential() {
        assert_eq!(Sampler::Sequential.indices(4, 9), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_random_is_a_reproducible_permutation() {
        let sampler = Sampler::Random { seed: 42 };
        let first = sampler.indices(100, 0);
        assert_eq!(first, sampler.indices(100, 0));

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());

        assert_ne!(first, sampler.indices(100, 1));
    }

    #[test]
    fn test_indices() {
        let sampler = Sampler::Indices(vec![3, 1, 3]);
        assert_eq!(sampler.indices(10, 5), vec![3, 1, 3]);
    }

    #[test]
    fn test_chunked_batch_sampler() {
        let bs = BatchSampler::chunked(&Sampler::Sequential, 5, 2);
        assert_eq!(bs.batches(), &[vec![0, 1], vec![2, 3], vec![4]]);
    }
}
