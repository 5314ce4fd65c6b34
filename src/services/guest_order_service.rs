use crate::{
    dto::orders::{CreateOrderRequest, CreateOrderResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::order_service,
    state::AppState,
};

/// Public order placement. Lookup failures are reported to the guest as one
/// generic bad request; the offending tenant, table or item is only logged.
pub async fn place_order(
    state: &AppState,
    mut payload: CreateOrderRequest,
) -> AppResult<ApiResponse<CreateOrderResponse>> {
    normalize_order_request(&mut payload)?;

    let created = match order_service::create_guest_order(&state.orm, &payload).await {
        Ok(created) => created,
        Err(AppError::NotFound(what)) => {
            tracing::warn!(
                tenant = %payload.tenant,
                table_token = %payload.table_token,
                missing = %what,
                "guest order rejected"
            );
            return Err(AppError::bad_request("order could not be placed"));
        }
        Err(err) => return Err(err),
    };

    Ok(ApiResponse::success(
        "Order created",
        created,
        Some(Meta::empty()),
    ))
}

/// Trims identifiers and rejects incomplete payloads before any database work.
pub fn normalize_order_request(payload: &mut CreateOrderRequest) -> Result<(), AppError> {
    payload.tenant = payload.tenant.trim().to_string();
    payload.table_token = payload.table_token.trim().to_string();
    payload.guest_session_id = payload.guest_session_id.trim().to_string();
    payload.note = payload
        .note
        .take()
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty());

    if payload.tenant.is_empty() {
        return Err(AppError::bad_request("tenant is required"));
    }
    if payload.table_token.is_empty() {
        return Err(AppError::bad_request("table_token is required"));
    }
    if payload.guest_session_id.is_empty() {
        return Err(AppError::bad_request("guest_session_id is required"));
    }
    if payload.items.is_empty() {
        return Err(AppError::bad_request("order must contain at least one item"));
    }
    if let Some(line) = payload.items.iter().find(|line| line.qty <= 0) {
        return Err(AppError::bad_request(format!(
            "qty must be positive for item {}",
            line.item_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::dto::orders::CreateOrderItem;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            tenant: " acme ".into(),
            table_token: "tok-7".into(),
            guest_session_id: "g1".into(),
            note: Some("   ".into()),
            items: vec![CreateOrderItem {
                item_id: Uuid::new_v4(),
                qty: 2,
                options: None,
            }],
        }
    }

    #[test]
    fn trims_identifiers_and_drops_blank_note() {
        let mut req = request();
        normalize_order_request(&mut req).unwrap();
        assert_eq!(req.tenant, "acme");
        assert_eq!(req.note, None);
    }

    #[test]
    fn rejects_missing_fields() {
        let cases: [fn(&mut CreateOrderRequest); 5] = [
            |r| r.tenant.clear(),
            |r| r.table_token = "  ".into(),
            |r| r.guest_session_id.clear(),
            |r| r.items.clear(),
            |r| r.items[0].qty = 0,
        ];
        for mutate in cases {
            let mut req = request();
            mutate(&mut req);
            let err = normalize_order_request(&mut req).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{err}");
        }
    }
}
