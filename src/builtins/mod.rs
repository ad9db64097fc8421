//! Built-in callables, organized into one submodule per category, each
//! with its own `register` function — following the teacher's
//! `builtins/mod.rs` layout.
//!
//! - **[arithmetic]**: `+ - * / %`
//! - **[comparison]**: `= != < <= > >=`
//! - **[logic]**: `not`/`!`
//! - **[strings]**: `str`, `upcase`, `downcase`, `strip`
//! - **[arrays]**: `array`, `first`, `last`, `nth`, `length`, `max`, `min`, `member?`
//! - **[conversions]**: `int`, `float`, `time`
//! - **[time]**: `now`, `seconds`/`minutes`/`hours`/`days`/`months`, `ago`, `from-now`
//! - **[random]**: `rand`
//! - **[meta]**: `identity`
//!
//! `and`, `or`, `if`, `cond`, `let`, `lambda`, `defn`, `setglobal`, `expr`,
//! and `apply` are special forms, registered separately by
//! `crate::special_forms::register`.

use crate::env::Environment;
use std::rc::Rc;

pub mod arithmetic;
pub mod arrays;
pub mod comparison;
pub mod conversions;
pub mod logic;
pub mod meta;
pub mod random;
pub mod strings;
pub mod time;

/// Registers every built-in category into `env`.
pub fn register_all(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    logic::register(env);
    strings::register(env);
    arrays::register(env);
    conversions::register(env);
    time::register(env);
    random::register(env);
    meta::register(env);
}
