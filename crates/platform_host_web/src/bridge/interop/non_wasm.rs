pub async fn register_service_worker(
    _script_url: &str,
    _scope: Option<&str>,
) -> Result<bool, String> {
    Ok(false)
}

pub async fn unregister_service_worker() -> Result<bool, String> {
    Ok(false)
}
