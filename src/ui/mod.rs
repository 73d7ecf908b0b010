//! Console output helpers shared by CLI commands

mod output;

pub use output::{
    key_value, key_value_status, remark, step_error_detail, step_ok, step_ok_detail,
    step_warn_hint,
};
