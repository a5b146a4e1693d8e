// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `introspect backends` command: report which frameworks can be used.

use lazy_backend::{installed, Framework};

pub fn execute() -> anyhow::Result<()> {
    println!("  {:<12} {:<10} Detail", "Framework", "Status");
    println!("  {}", "-".repeat(60));

    for framework in Framework::ALL {
        match installed::availability(framework.as_str()) {
            Ok(_) => println!("  {:<12} {:<10}", framework.as_str(), "available"),
            Err(reason) => println!("  {:<12} {:<10} {reason}", framework.as_str(), "missing"),
        }
    }
    println!();
    println!(
        "  Set {} to a comma-separated list to disable frameworks.",
        installed::DISABLE_ENV,
    );
    Ok(())
}
