// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Framework data modules, resolved lazily.

use lazy_backend::{installed, Framework, LazyBackend};

/// A resolved framework data-loading module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataModule {
    pub framework: Framework,
    /// Native loader constructor the configuration is mapped onto.
    pub loader: &'static str,
}

pub type DataHandle = LazyBackend<DataModule>;

pub static TENSORFLOW_DATA: DataHandle =
    LazyBackend::new("tensorflow", || resolve(Framework::Tensorflow, "tf.data.Dataset"));

pub static PYTORCH_DATA: DataHandle = LazyBackend::new("pytorch", || {
    resolve(Framework::Pytorch, "torch.utils.data.DataLoader")
});

pub static MXNET_DATA: DataHandle =
    LazyBackend::new("mxnet", || resolve(Framework::Mxnet, "mxnet.gluon.data.DataLoader"));

pub static ONNXRT_DATA: DataHandle =
    LazyBackend::new("onnxrt", || resolve(Framework::Onnxrt, "DefaultDataLoader"));

fn resolve(framework: Framework, loader: &'static str) -> Result<DataModule, String> {
    installed::require(framework)?;
    Ok(DataModule { framework, loader })
}

/// Process-wide handle for `framework`.
pub fn handle(framework: Framework) -> &'static DataHandle {
    match framework {
        Framework::Tensorflow => &TENSORFLOW_DATA,
        Framework::Pytorch => &PYTORCH_DATA,
        Framework::Mxnet => &MXNET_DATA,
        Framework::Onnxrt => &ONNXRT_DATA,
    }
}
