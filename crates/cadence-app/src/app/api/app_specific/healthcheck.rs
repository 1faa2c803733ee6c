use salvo::{Router, handler};

#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use salvo::test::{ResponseExt, TestClient};

    #[tokio::test]
    async fn test_healthcheck_reports_ok() {
        let service = salvo::Service::new(super::routes());

        let mut res = TestClient::get("http://127.0.0.1:5800/healthcheck")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await.unwrap(), "OK");
    }
}
