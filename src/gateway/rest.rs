use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_native_tls::{native_tls, TlsConnector};

use crate::api::dto::{
    ListRespDto, OrderCreateReqDto, OrderDto, OrderLineCreateReqDto, OrderLineDto,
    OrderLineQtyPatchDto, OrderStatusDto, OrderStatusPatchDto, OwnerProfileDto,
};
use crate::auth::AppBackendAuth;
use crate::config::AppBackendApiCfg;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CartLineModel, CartModel, OrderHistoryModel};

use super::base_client::BaseClient;
use super::AbsCartGateway;

/// adapter of the storefront backend REST contract, one short-lived
/// http/1 connection per call, credentials attached to every request
pub struct AppRestCartGateway {
    _host: String,
    _port: u16,
    _api_prefix: String,
    _auth: AppBackendAuth,
    _secure_connector: Option<TlsConnector>,
    _logctx: Arc<AppLogContext>,
}

impl AppRestCartGateway {
    pub fn try_build(
        cfg: &AppBackendApiCfg,
        auth: AppBackendAuth,
        logctx: Arc<AppLogContext>,
    ) -> DefaultResult<Self, AppError> {
        let _secure_connector = if cfg.secure {
            let mut builder = native_tls::TlsConnector::builder();
            builder.min_protocol_version(Some(native_tls::Protocol::Tlsv12));
            let sc = builder.build().map_err(|e| AppError {
                code: AppErrorCode::CryptoFailure,
                detail: Some(e.to_string()),
            })?;
            Some(sc.into())
        } else {
            None
        };
        Ok(Self {
            _host: cfg.host.clone(),
            _port: cfg.port,
            _api_prefix: cfg.api_version.clone(),
            _auth: auth,
            _secure_connector,
            _logctx: logctx,
        })
    }

    async fn _execute(
        &self,
        resource_path: String,
        method: Method,
        rawbody: Option<Vec<u8>>,
    ) -> DefaultResult<(Vec<u8>, StatusCode), AppError> {
        let mut _client = BaseClient::try_build(
            self._host.clone(),
            self._port,
            self._secure_connector.as_ref(),
            self._logctx.clone(),
        )
        .await?;
        let headers: Vec<(HeaderName, HeaderValue)> = vec![self._auth.to_header()?];
        let fullpath = format!("{}{}", self._api_prefix, resource_path);
        _client
            .execute(fullpath.as_str(), method, headers, rawbody)
            .await
    }

    fn _encode<T: Serialize>(data: &T) -> DefaultResult<Vec<u8>, AppError> {
        serde_json::to_vec(data).map_err(|e| AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string()),
        })
    }

    fn _decode<T: DeserializeOwned>(&self, rawbody: &[u8]) -> DefaultResult<T, AppError> {
        serde_json::from_slice::<T>(rawbody).map_err(|e| {
            let logctx_p = &self._logctx;
            let detail = e.to_string();
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", &detail);
            AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(detail),
            }
        })
    }

    fn _remote_failure(&self, resource: &str, status: StatusCode) -> AppError {
        let logctx_p = &self._logctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::WARNING,
            "resource:{}, status:{}",
            resource,
            status.as_u16()
        );
        AppError {
            code: AppErrorCode::RemoteSrvFailure,
            detail: Some(format!("resource:{}, status:{}", resource, status.as_u16())),
        }
    }

    async fn _fetch_draft_dto(&self, owner: &str) -> DefaultResult<Option<OrderDto>, AppError> {
        let path = format!("/orders/?telegram_id={owner}&status=draft");
        let (raw, status) = self._execute(path, Method::GET, None).await?;
        if !status.is_success() {
            return Err(self._remote_failure("orders-draft", status));
        }
        let found = self
            ._decode::<ListRespDto<OrderDto>>(raw.as_slice())?
            .into_vec()
            .into_iter()
            .next();
        Ok(found)
    }
} // end of impl AppRestCartGateway

#[async_trait]
impl AbsCartGateway for AppRestCartGateway {
    async fn fetch_draft_cart(&self, owner: &str) -> DefaultResult<Option<CartModel>, AppError> {
        let found = self._fetch_draft_dto(owner).await?;
        Ok(found.map(|d| CartModel::from((owner.to_string(), d))))
    }

    async fn create_cart(
        &self,
        owner: &str,
        profile: &OwnerProfileDto,
    ) -> DefaultResult<CartModel, AppError> {
        let reqbody = OrderCreateReqDto {
            telegram_id: owner.to_string(),
            username: profile.username.clone(),
            phone_number: profile.phone_number.clone(),
            customer_name: profile.customer_name.clone(),
            status: OrderStatusDto::Draft,
            total_cost: Decimal::ZERO,
        };
        let raw_req = Self::_encode(&reqbody)?;
        let (raw, status) = self
            ._execute("/orders/".to_string(), Method::POST, Some(raw_req))
            .await?;
        if !status.is_success() {
            return Err(self._remote_failure("orders-create", status));
        }
        let data = self._decode::<OrderDto>(raw.as_slice())?;
        Ok(CartModel::from((owner.to_string(), data)))
    }

    async fn add_item(
        &self,
        cart_id: u64,
        product_id: u64,
        qty: u32,
    ) -> DefaultResult<CartLineModel, AppError> {
        let reqbody = OrderLineCreateReqDto {
            order: cart_id,
            product: product_id,
            quantity: qty,
        };
        let raw_req = Self::_encode(&reqbody)?;
        let (raw, status) = self
            ._execute("/order-items/".to_string(), Method::POST, Some(raw_req))
            .await?;
        if !status.is_success() {
            return Err(self._remote_failure("order-items-create", status));
        }
        let data = self._decode::<OrderLineDto>(raw.as_slice())?;
        Ok(CartLineModel::from(data))
    }

    async fn update_item(
        &self,
        item_id: u64,
        qty: u32,
    ) -> DefaultResult<CartLineModel, AppError> {
        let reqbody = OrderLineQtyPatchDto { quantity: qty };
        let raw_req = Self::_encode(&reqbody)?;
        let path = format!("/order-items/{item_id}/");
        let (raw, status) = self._execute(path, Method::PATCH, Some(raw_req)).await?;
        if !status.is_success() {
            return Err(self._remote_failure("order-items-update", status));
        }
        let data = self._decode::<OrderLineDto>(raw.as_slice())?;
        Ok(CartLineModel::from(data))
    }

    async fn remove_item(&self, item_id: u64) -> DefaultResult<(), AppError> {
        let path = format!("/order-items/{item_id}/");
        let (_raw, status) = self._execute(path, Method::DELETE, None).await?;
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(self._remote_failure("order-items-delete", status))
        }
    }

    async fn clear_cart(&self, owner: &str) -> DefaultResult<(), AppError> {
        let found = self._fetch_draft_dto(owner).await?;
        let Some(oid) = found.and_then(|d| d.id) else {
            return Ok(()); // nothing persisted remotely, nothing to cancel
        };
        let reqbody = OrderStatusPatchDto {
            status: OrderStatusDto::Canceled,
        };
        let raw_req = Self::_encode(&reqbody)?;
        let path = format!("/orders/{oid}/");
        let (_raw, status) = self._execute(path, Method::PATCH, Some(raw_req)).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(self._remote_failure("orders-cancel", status))
        }
    }

    async fn confirm_order(&self, cart_id: u64) -> DefaultResult<CartModel, AppError> {
        let reqbody = OrderStatusPatchDto {
            status: OrderStatusDto::Confirmed,
        };
        let raw_req = Self::_encode(&reqbody)?;
        let path = format!("/orders/{cart_id}/");
        let (raw, status) = self._execute(path, Method::PATCH, Some(raw_req)).await?;
        if !status.is_success() {
            return Err(self._remote_failure("orders-confirm", status));
        }
        let data = self._decode::<OrderDto>(raw.as_slice())?;
        let owner = data.telegram_id.clone().unwrap_or_default();
        Ok(CartModel::from((owner, data)))
    }

    async fn fetch_order_history(
        &self,
        owner: &str,
    ) -> DefaultResult<Vec<OrderHistoryModel>, AppError> {
        let path = format!("/orders/me/?telegram_id={owner}");
        let (raw, status) = self._execute(path, Method::GET, None).await?;
        if !status.is_success() {
            return Err(self._remote_failure("orders-history", status));
        }
        let logctx_p = &self._logctx;
        let out = self
            ._decode::<ListRespDto<OrderDto>>(raw.as_slice())?
            .into_vec()
            .into_iter()
            .filter_map(|d| match OrderHistoryModel::try_from(d) {
                Ok(m) => Some(m),
                Err(_d) => {
                    app_log_event!(logctx_p, AppLogLevel::WARNING, "order-without-id-skipped");
                    None
                }
            })
            .collect::<Vec<_>>();
        Ok(out)
    }
} // end of impl AbsCartGateway for AppRestCartGateway
