/// Plain-text banner listing the available routes.
pub const BANNER: &str = "Minimal doc-host app (for lab). Use /upload, /submit, /login.";

pub async fn index_handler() -> &'static str {
    BANNER
}
