use web_sys::Storage;

/// Browser `localStorage`, where the session tokens and the cached user
/// profile live between page loads.
pub fn local_storage() -> Result<Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .local_storage()
        .map_err(|_| "localStorage unavailable".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}
