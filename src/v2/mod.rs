/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod client;
mod macros;
mod parsers;
pub mod pager;
pub mod live_photo;
pub mod errors;

pub use api::*;
pub use client::*;
pub use errors::*;
pub use live_photo::*;
pub use pager::*;
