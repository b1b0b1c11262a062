use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginForm, RefreshRequest, TokenPair},
        books::{BookList, CreateBookRequest, UpdateBookRequest},
        cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
        favorites::{FavoriteBookList, ToggleFavoriteResponse},
        orders::{OrderList, OrderWithItems, PlaceOrderRequest, UpdateOrderStatusRequest},
        reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
        stats::{DailySales, DailySalesList, TopSeller, TopSellerList},
        users::{SignupRequest, UpdateMeRequest, UserList, UserStatusUpdate},
    },
    error::ErrorBody,
    models::{Book, CartItem, Favorite, Gender, Order, OrderItem, OrderStatus, Review, Role, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, books, cart, favorites, health, orders, params, reviews, stats, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::refresh,
        auth::logout,
        users::signup,
        users::me,
        users::update_me,
        users::delete_me,
        users::list_users,
        users::update_user_status,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        orders::list_orders,
        orders::place_order,
        orders::get_order,
        orders::cancel_order,
        reviews::create_review,
        reviews::list_reviews,
        reviews::update_review,
        reviews::delete_review,
        favorites::toggle_favorite,
        favorites::list_favorites,
        stats::daily_sales,
        stats::top_sellers,
        admin::list_all_orders,
        admin::update_order_status
    ),
    components(
        schemas(
            User,
            Book,
            CartItem,
            Order,
            OrderItem,
            Review,
            Favorite,
            Role,
            Gender,
            OrderStatus,
            LoginForm,
            TokenPair,
            RefreshRequest,
            SignupRequest,
            UpdateMeRequest,
            UserStatusUpdate,
            UserList,
            CreateBookRequest,
            UpdateBookRequest,
            BookList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartItemDto,
            CartList,
            PlaceOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderWithItems,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewList,
            ToggleFavoriteResponse,
            FavoriteBookList,
            DailySales,
            DailySalesList,
            TopSeller,
            TopSellerList,
            params::Pagination,
            params::BookQuery,
            params::OrderListQuery,
            Meta,
            ErrorBody,
            ApiResponse<Book>,
            ApiResponse<BookList>,
            ApiResponse<CartList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<TokenPair>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Account endpoints"),
        (name = "Books", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Stats", description = "Sales statistics endpoints"),
        (name = "Admin", description = "Fulfillment endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
