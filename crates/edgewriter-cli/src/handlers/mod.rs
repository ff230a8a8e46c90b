//! Command handlers, one module per subcommand.

pub mod gpu_info;
pub mod paths;
pub mod serve;
