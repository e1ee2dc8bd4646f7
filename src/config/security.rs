use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const PERMISSIONS_POLICY: &str = "permissions-policy";

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_VALUE: &str = "default-src 'self'; img-src * data:; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

/// Response headers stamped on every page. Handlers may set their own first.
#[derive(Debug, Clone, Copy)]
pub struct SecurityHeaders {
    include_hsts: bool,
}

impl SecurityHeaders {
    pub fn new(include_hsts: bool) -> Self {
        if include_hsts {
            tracing::info!("Security: HSTS header enabled (production mode)");
        } else {
            tracing::info!("Security: HSTS header disabled (development mode)");
        }
        Self { include_hsts }
    }

    fn headers(self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF)),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static(DENY)),
            (header::X_XSS_PROTECTION, HeaderValue::from_static(XSS_BLOCK)),
            (header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP_VALUE)),
            (header::REFERRER_POLICY, HeaderValue::from_static(REFERRER_POLICY_VALUE)),
            (
                HeaderName::from_static(PERMISSIONS_POLICY),
                HeaderValue::from_static(PERMISSIONS_POLICY_VALUE),
            ),
        ];
        // HTTPS deployments only
        if self.include_hsts {
            headers.push((header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS_VALUE)));
        }
        headers
    }

    pub fn apply(self, router: Router) -> Router {
        self.headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::if_not_present(name, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_only_when_requested() {
        let without = SecurityHeaders::new(false).headers();
        assert!(without
            .iter()
            .all(|(name, _)| *name != header::STRICT_TRANSPORT_SECURITY));

        let with = SecurityHeaders::new(true).headers();
        assert_eq!(with.len(), without.len() + 1);
        assert!(with
            .iter()
            .any(|(name, _)| *name == header::STRICT_TRANSPORT_SECURITY));
    }
}
