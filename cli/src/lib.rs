// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of classday, a personal A/B day class schedule.

mod cli;
mod cmd_assign;
mod cmd_courses;
mod cmd_generate_completion;
mod cmd_show;
mod cmd_watch;
mod config;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
