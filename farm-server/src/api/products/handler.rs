//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_price,
    validate_required_text, validate_text_len,
};
use crate::utils::{AppError, AppResult};

/// Query parameters for the public listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub seller_id: Option<String>,
}

/// Delete result; a missing id is not an error
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: bool,
}

/// GET /api/products - 获取所有商品 (可按卖家过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = match query.seller_id.as_deref() {
        Some(seller_id) => repo.find_by_seller(seller_id).await?,
        None => repo.find_all().await?,
    };

    Ok(Json(products))
}

/// GET /api/products/seller - 当前卖家的商品
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_by_seller(&user.id).await?;
    Ok(Json(products))
}

/// POST /api/products - 创建商品
///
/// sellerId 取自已验证的令牌，不信任请求体。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    if !user.is_seller() {
        return Err(AppError::forbidden("Only sellers can list products"));
    }

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_text_len(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_text_len(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&payload.image_url, "imageUrl", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload, &user.id).await?;

    let id = product.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(product_id = %id, seller_id = %user.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// DELETE /api/products/{id} - 删除商品
///
/// 幂等：重复删除返回 `deleted: false`，仍是 200。
/// 卖家只能删除自己的商品 (管理员不受限)。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !user.is_seller() {
        return Err(AppError::forbidden("Only sellers can delete products"));
    }

    let repo = ProductRepository::new(state.db.clone());

    match repo.find_by_id(&id).await? {
        Some(product) => {
            if product.seller_id != user.id && !user.is_admin() {
                return Err(AppError::forbidden("You can only delete your own products"));
            }

            let deleted = repo.delete(&id).await?;
            tracing::info!(product_id = %id, seller_id = %user.id, "Product deleted");
            Ok(Json(DeleteResponse {
                message: "Product deleted".to_string(),
                deleted,
            }))
        }
        None => Ok(Json(DeleteResponse {
            message: "No product found with that id".to_string(),
            deleted: false,
        })),
    }
}
