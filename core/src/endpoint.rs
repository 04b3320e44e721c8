//! Endpoint registry for the posts service.
//!
//! Paths are templates; `{id}` is replaced literally by [`resolve`]. Ids are
//! not validated, so negative tests can push `xyz` straight through.

/// Public origin of the service.
pub const HOST: &str = "https://jsonplaceholder.typicode.com";

pub const POSTS: &str = "/posts";
pub const POST_ID: &str = "/posts/{id}";
pub const POST_ID_COMMENTS: &str = "/posts/{id}/comments";
pub const COMMENTS: &str = "/comments";

const ID_TOKEN: &str = "{id}";

/// Substitute `id` for the `{id}` token in `template`.
pub fn resolve(template: &str, id: &str) -> String {
    template.replace(ID_TOKEN, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_substitutes_id() {
        assert_eq!(resolve(POST_ID, "3"), "/posts/3");
        assert_eq!(resolve(POST_ID_COMMENTS, "8"), "/posts/8/comments");
    }

    #[test]
    fn resolve_passes_malformed_ids_through() {
        assert_eq!(resolve(POST_ID, "xyz"), "/posts/xyz");
        assert_eq!(resolve(POST_ID, ""), "/posts/");
    }

    #[test]
    fn resolve_leaves_plain_paths_alone() {
        assert_eq!(resolve(POSTS, "3"), "/posts");
        assert_eq!(resolve(COMMENTS, "3"), "/comments");
    }
}
