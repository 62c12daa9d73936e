//! App Router

use salvo::Router;

use crate::{
    auth::middleware::{optional_auth, require_admin, require_auth},
    bookings, carts, products, users,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(users_router())
        .push(products_router())
        .push(carts_router())
        .push(bookings_router())
}

fn admin() -> Router {
    Router::new().hoop(require_auth).hoop(require_admin)
}

fn users_router() -> Router {
    Router::with_path("users")
        .push(Router::with_path("register").post(users::register::handler))
        .push(Router::with_path("login").post(users::login::handler))
        .push(
            Router::new()
                .hoop(require_auth)
                .push(Router::with_path("details").get(users::details::handler))
                .push(Router::with_path("update-password").patch(users::update_password::handler)),
        )
        .push(admin().push(Router::with_path("{id}/set-as-admin").patch(users::set_as_admin::handler)))
}

fn products_router() -> Router {
    Router::with_path("products")
        .push(
            admin()
                .post(products::create::handler)
                .push(Router::with_path("all").get(products::all::handler))
                .push(Router::with_path("{product}/update").patch(products::update::handler))
                .push(Router::with_path("{product}/archive").patch(products::archive::handler))
                .push(Router::with_path("{product}/activate").patch(products::activate::handler)),
        )
        .push(Router::with_path("active").get(products::active::handler))
        .push(Router::with_path("search-by-name").post(products::search_by_name::handler))
        .push(Router::with_path("search-by-price").post(products::search_by_price::handler))
        .push(
            Router::with_path("search-by-description")
                .post(products::search_by_description::handler),
        )
        .push(Router::with_path("filter").post(products::filter::handler))
        .push(Router::with_path("{product}").get(products::get::handler))
}

fn carts_router() -> Router {
    Router::with_path("cart")
        .hoop(optional_auth)
        .push(Router::with_path("get-cart").get(carts::get::handler))
        .push(Router::with_path("add-to-cart").post(carts::add::handler))
        .push(Router::with_path("update-cart-quantity").patch(carts::update_quantity::handler))
        .push(Router::with_path("{product}/remove-from-cart").patch(carts::remove::handler))
        .push(Router::with_path("clear-cart").put(carts::clear::handler))
        .push(Router::with_path("cart-item-count").get(carts::count::handler))
        .push(Router::with_path("book").post(carts::book::handler))
}

fn bookings_router() -> Router {
    Router::with_path("bookings")
        .push(
            Router::with_path("book-now/{email}")
                .hoop(optional_auth)
                .post(bookings::book_now::handler),
        )
        .push(Router::with_path("my-bookings/{email}").get(bookings::my_bookings::handler))
        .push(admin().push(Router::with_path("all-bookings").get(bookings::all_bookings::handler)))
        .push(Router::with_path("confirm/{booking}").patch(bookings::confirm::handler))
        .push(Router::with_path("cancel/{booking}").patch(bookings::cancel::handler))
        .push(Router::with_path("complete/{booking}").patch(bookings::complete::handler))
        .push(Router::with_path("update/{id}").patch(bookings::update::handler))
}
