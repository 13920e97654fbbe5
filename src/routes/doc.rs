use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        catalog::{
            CategoryList, CreateCategoryRequest, CreateParameterRequest, CreateProductRequest,
            CreateShopRequest, ParameterList, ProductList, SetCategoryShopsRequest, ShopList,
            UpdateShopRequest,
        },
        contacts::{ContactList, CreateContactRequest, UpdateContactRequest},
        orders::{
            CreateOrderItemRequest, CreateOrderRequest, OrderList, UpdateOrderItemRequest,
            UpdateOrderRequest,
        },
        product_infos::{
            CreateProductInfoRequest, ProductInfoList, ProductParameterInput,
            UpdateProductInfoRequest,
        },
        users::{ConfirmEmailRequest, CreateUserRequest, UpdateUserRequest},
    },
    entity::orders::OrderStatus,
    models::{
        Category, Contact, Order, OrderItem, OrderItemDetail, OrderSummary, Parameter, Product,
        ProductInfo, ProductParameter, Shop, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        categories, contacts, health, order_items, orders, params, product_infos, products, shops,
        users,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::db_health_check,
        users::register,
        users::confirm_email,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::list_user_contacts,
        contacts::create_contact,
        contacts::update_contact,
        contacts::delete_contact,
        shops::list_shops,
        shops::create_shop,
        shops::get_shop,
        shops::update_shop,
        shops::delete_shop,
        shops::list_shop_categories,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::set_category_shops,
        categories::delete_category,
        products::list_products,
        products::create_product,
        products::get_product,
        products::list_parameters,
        products::create_parameter,
        product_infos::list_product_infos,
        product_infos::create_product_info,
        product_infos::get_product_info,
        product_infos::update_product_info,
        product_infos::delete_product_info,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        order_items::add_order_item,
        order_items::update_order_item,
        order_items::delete_order_item
    ),
    components(
        schemas(
            User,
            Contact,
            Shop,
            Category,
            Parameter,
            Product,
            ProductParameter,
            ProductInfo,
            OrderItem,
            OrderItemDetail,
            Order,
            OrderSummary,
            OrderStatus,
            CreateUserRequest,
            UpdateUserRequest,
            ConfirmEmailRequest,
            CreateContactRequest,
            UpdateContactRequest,
            ContactList,
            CreateShopRequest,
            UpdateShopRequest,
            ShopList,
            CreateCategoryRequest,
            SetCategoryShopsRequest,
            CategoryList,
            CreateProductRequest,
            ProductList,
            CreateParameterRequest,
            ParameterList,
            ProductParameterInput,
            CreateProductInfoRequest,
            UpdateProductInfoRequest,
            ProductInfoList,
            CreateOrderRequest,
            UpdateOrderRequest,
            CreateOrderItemRequest,
            UpdateOrderItemRequest,
            OrderList,
            params::Pagination,
            params::SortOrder,
            health::HealthData,
            Meta,
            ApiResponse<User>,
            ApiResponse<Contact>,
            ApiResponse<Shop>,
            ApiResponse<Product>,
            ApiResponse<ProductInfo>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<ProductInfoList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "User accounts and email confirmation"),
        (name = "Contacts", description = "Delivery contacts of users"),
        (name = "Shops", description = "Shop endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Products and parameters"),
        (name = "Product infos", description = "Per-shop product listings"),
        (name = "Orders", description = "Orders and order items"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
