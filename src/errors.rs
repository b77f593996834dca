use scope_core::AcquireError;

// getUserMedia rejects with a DOMException; only these names mean the user
// (or page policy) refused access
#[inline]
pub fn acquire_error_from_dom(name: &str, message: &str) -> AcquireError {
    let detail = if message.is_empty() {
        name.to_string()
    } else {
        format!("{name}: {message}")
    };
    match name {
        "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
            AcquireError::PermissionDenied(detail)
        }
        _ => AcquireError::DeviceUnavailable(detail),
    }
}

/// Run `release` when `result` is an error, then pass the result through.
/// Used to undo a partially wired browser audio graph.
pub fn release_on_err<T, E>(result: Result<T, E>, release: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        release();
    }
    result
}
