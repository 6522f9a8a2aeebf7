//! Numeric autosize formulas.
//!
//! Each mirrors the server's own startup computation. Inputs that are
//! missing or not numeric make the formula return `None`.

use crate::compare::is_true;
use crate::detection::{EnvironmentInfo, OsFamily, Platform};
use crate::input::ObservedVariables;

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// `min(50 + max_connections / 5, 900)`
pub fn back_log(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let max_connections = vars.get_u64("max_connections")?;
    Some(50u64.saturating_add(max_connections / 5).min(900).to_string())
}

/// `min(128 + min(max_connections, 500) + max(0, (max_connections - 500) / 20), 2000)`
pub fn host_cache_size(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let max_connections = vars.get_u64("max_connections")?;
    let over = max_connections.saturating_sub(500) / 20;
    Some(
        (128 + max_connections.min(500))
            .saturating_add(over)
            .min(2000)
            .to_string(),
    )
}

/// Pool instances from `innodb_buffer_pool_size`.
///
/// 32-bit Windows builds split pools of 1.3 GiB or more into 128 MiB
/// instances; everything else gets 8 instances from 1 GiB on.
pub fn innodb_buffer_pool_instances(
    vars: &ObservedVariables,
    env: EnvironmentInfo,
) -> Option<String> {
    let size = vars.get_u64("innodb_buffer_pool_size")?;
    let instances = if env.os == OsFamily::Windows && env.platform == Platform::Bits32 {
        // size >= 1.3 GiB, in integers
        if size.saturating_mul(10) >= 13 * GIB {
            size.div_ceil(128 * MIB)
        } else {
            1
        }
    } else if size >= GIB {
        8
    } else {
        1
    };
    Some(instances.to_string())
}

/// `max(innodb_io_capacity * 2, 2000)`
pub fn innodb_io_capacity_max(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let io_capacity = vars.get_u64("innodb_io_capacity")?;
    Some(io_capacity.saturating_mul(2).max(2000).to_string())
}

/// 300 without file-per-table, else `max(table_open_cache, 300)`.
pub fn innodb_open_files(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let file_per_table = vars.get("innodb_file_per_table")?;
    let table_open_cache = vars.get_u64("table_open_cache")?;
    let files = if is_true(file_per_table) {
        table_open_cache.max(300)
    } else {
        300
    };
    Some(files.to_string())
}

/// `max(10 + max_connections + 2 * table_open_cache, max_connections * 5, 5000)`
pub fn open_files_limit(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let max_connections = vars.get_u64("max_connections")?;
    let table_open_cache = vars.get_u64("table_open_cache")?;
    let by_tables = 10u64
        .saturating_add(max_connections)
        .saturating_add(table_open_cache.saturating_mul(2));
    let by_connections = max_connections.saturating_mul(5);
    Some(by_tables.max(by_connections).max(5000).to_string())
}

/// `min(400 + table_open_cache / 2, 2000)`
pub fn table_definition_cache(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let table_open_cache = vars.get_u64("table_open_cache")?;
    Some(
        400u64
            .saturating_add(table_open_cache / 2)
            .min(2000)
            .to_string(),
    )
}

/// `min(8 + max_connections / 100, 100)`
pub fn thread_cache_size(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    let max_connections = vars.get_u64("max_connections")?;
    Some(
        8u64.saturating_add(max_connections / 100)
            .min(100)
            .to_string(),
    )
}
