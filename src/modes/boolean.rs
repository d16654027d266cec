//! Process existence as an exit code.

/// 0 when at least one process matched, 1 otherwise.
pub fn exit_code(count: usize) -> i32 {
    if count > 0 {
        0
    } else {
        1
    }
}
