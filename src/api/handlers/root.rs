use crate::GIT_COMMIT_HASH;

// axum handler for /
pub async fn root() -> String {
    format!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        GIT_COMMIT_HASH
    )
}

#[cfg(test)]
mod tests {
    use super::root;

    #[tokio::test]
    async fn root_names_the_service() {
        let body = root().await;
        assert!(body.starts_with(env!("CARGO_PKG_NAME")));
        assert!(body.contains(env!("CARGO_PKG_VERSION")));
    }
}
