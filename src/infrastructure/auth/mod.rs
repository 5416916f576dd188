pub mod middleware;
pub mod render_context;
pub mod request_id;

pub use middleware::{
    admin_auth_middleware, admin_page_auth_middleware, authorize_admin, AdminUser,
    ACCESS_TOKEN_COOKIE,
};
pub use render_context::X_RENDER_CONTEXT;
pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};
