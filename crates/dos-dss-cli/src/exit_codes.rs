//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const UPSTREAM_ERROR: i32 = 1; // Upstream unreachable, bad response, or record not found
pub const CONFIG_ERROR: i32 = 2; // Bad arguments, I/O, or internal failure
pub const MANIFEST_VIOLATION: i32 = 3; // Manifest cannot be bagged as requested
