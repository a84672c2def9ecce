/// Pre-submit check mirroring the form's `required` attributes; anything
/// caught here never reaches the network.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("Podaj nazwę użytkownika i hasło".to_string());
    }
    Ok(())
}
