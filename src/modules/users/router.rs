use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_admin, require_user};
use crate::modules::auth::controller::{login, register};
use crate::modules::users::controller::{
    change_picture, delete_me, delete_picture, delete_user, get_me, get_users, update_me_name,
    update_user,
};
use crate::state::AppState;

/// All user-facing routes, grouped by the role gate they sit behind.
///
/// Registration and login are public; `/me` and picture upload require any
/// authenticated user; listing and per-id mutation require an admin (who
/// also passes the user gates, per the role policy).
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(get_users))
        .route("/{user_id}", patch(update_user).delete(delete_user))
        .route("/picture/{user_id}", delete(delete_picture))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let user_routes = Router::new()
        .route("/me", get(get_me).delete(delete_me))
        .route("/me/name", patch(update_me_name))
        .route("/picture", patch(change_picture))
        .route_layer(middleware::from_fn_with_state(state, require_user));

    Router::new()
        .route("/", post(register))
        .route("/login", post(login))
        .merge(admin_routes)
        .merge(user_routes)
        // Picture uploads can exceed axum's default 2MB body cap
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
}
