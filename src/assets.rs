//! Static file serving under a fixed root.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::status::Status;

const INDEX_FILE: &str = "index.html";

/// Serves files beneath `root`. Mount it behind a prefix; the handler sees
/// the path with the prefix already stripped.
#[derive(Clone, Debug)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path onto the filesystem. `None` if any segment tries
    /// to leave the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => return None,
                s if s.contains('\\') || s.contains('\0') => return None,
                s => resolved.push(s),
            }
        }
        if path.ends_with('/') || path.is_empty() {
            resolved.push(INDEX_FILE);
        }
        Some(resolved)
    }

    /// Shares `self` behind an `Arc` as a route handler.
    pub fn into_handler(self) -> impl Handler {
        let files = Arc::new(self);
        move |req: Request| {
            let files = Arc::clone(&files);
            async move { files.serve(req).await }
        }
    }

    pub async fn serve(&self, req: Request) -> Response {
        if !matches!(req.method(), Method::Get | Method::Head) {
            return Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", "GET, HEAD")
                .no_body();
        }

        let Some(mut file) = self.resolve(req.path()) else {
            return Response::status(Status::NotFound);
        };
        if tokio::fs::metadata(&file).await.is_ok_and(|m| m.is_dir()) {
            file.push(INDEX_FILE);
        }

        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                let content_type = file.extension()
                    .and_then(|e| e.to_str())
                    .map_or(ContentType::OctetStream, ContentType::from_extension);
                Response::builder().bytes(content_type, bytes)
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Response::status(Status::NotFound)
            }
            Err(e) => {
                warn!(path = %file.display(), "static file read failed: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> Request {
        Request::new(Method::Get, path.to_owned(), Vec::new(), Vec::new())
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chirpy-assets-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Welcome to Chirpy</h1>").unwrap();
        std::fs::write(dir.join("assets").join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        dir
    }

    #[test]
    fn resolve_rejects_traversal() {
        let files = StaticFiles::new("/srv/www");
        assert_eq!(files.resolve("/../etc/passwd"), None);
        assert_eq!(files.resolve("/assets/../../x"), None);
        assert_eq!(files.resolve("/a\\..\\b"), None);
    }

    #[test]
    fn resolve_maps_directories_to_index() {
        let files = StaticFiles::new("/srv/www");
        assert_eq!(files.resolve("/"), Some(PathBuf::from("/srv/www/index.html")));
        assert_eq!(files.resolve("/./assets//logo.png"), Some(PathBuf::from("/srv/www/assets/logo.png")));
    }

    #[tokio::test]
    async fn serves_index_and_files_with_content_type() {
        let files = StaticFiles::new(scratch_dir("serve"));

        let res = files.serve(get("/")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(res.body(), b"<h1>Welcome to Chirpy</h1>");

        let res = files.serve(get("/assets/logo.png")).await;
        assert_eq!(res.header("content-type"), Some("image/png"));

        let res = files.serve(get("/assets")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let files = StaticFiles::new(scratch_dir("missing"));
        assert_eq!(files.serve(get("/nope.css")).await.status_code(), 404);
        assert_eq!(files.serve(get("/index.html/child")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn only_get_and_head_are_served() {
        let files = StaticFiles::new(scratch_dir("methods"));
        let req = Request::new(Method::Post, "/".into(), Vec::new(), Vec::new());
        let res = files.serve(req).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("GET, HEAD"));
    }
}
