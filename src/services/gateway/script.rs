use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use async_trait::async_trait;

use super::{
    BookingIntent, GatewayError, PersistenceGateway, RoomPayload, SettingsPayload, StatusUpdate,
};
use crate::models::{AppSettings, Booking, Room};

/// Gateway to the spreadsheet-script backend: a single URL taking POST with
/// a `{action, payload}` JSON body. The body is sent as text/plain so the
/// backend's cross-origin rules skip the preflight; that content type is an
/// interop detail of this backend, not part of the protocol.
pub struct ScriptGateway {
    url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl ScriptGateway {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// One round trip: posts the `{action, payload}` envelope and unwraps
    /// the `{success, data, error}` reply. Returns whatever `data` the
    /// backend attached, if any.
    async fn call_raw(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<Option<serde_json::Value>, GatewayError> {
        let body = json!({ "action": action, "payload": payload });

        tracing::debug!(action, "calling persistence backend");

        let resp = self
            .client
            .post(&self.url)
            .header("Content-Type", "text/plain;charset=utf-8")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "backend returned HTTP {status}"
            )));
        }

        // The backend always answers 200 with text; failures live in the
        // envelope, not the status code.
        let text = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Transport(format!("invalid response for {action}: {e}")))?;

        if !envelope.success {
            return Err(GatewayError::Backend(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown backend error".to_string()),
            ));
        }

        Ok(envelope.data)
    }

    /// For actions whose response must carry the authoritative entity.
    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<T, GatewayError> {
        let data = self.call_raw(action, payload).await?.ok_or_else(|| {
            GatewayError::Transport(format!("missing data in response for {action}"))
        })?;
        serde_json::from_value(data)
            .map_err(|e| GatewayError::Transport(format!("invalid data for {action}: {e}")))
    }

    /// For actions answered with a bare ack.
    async fn call_ack(&self, action: &str, payload: serde_json::Value) -> Result<(), GatewayError> {
        self.call_raw(action, payload).await.map(|_| ())
    }
}

#[async_trait]
impl PersistenceGateway for ScriptGateway {
    async fn get_rooms(&self) -> Result<Vec<Room>, GatewayError> {
        self.call("getRooms", json!({})).await
    }

    async fn get_settings(&self) -> Result<AppSettings, GatewayError> {
        self.call("getSettings", json!({})).await
    }

    async fn add_booking(&self, intent: &BookingIntent) -> Result<Booking, GatewayError> {
        let payload = serde_json::to_value(intent)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        self.call("addBooking", payload).await
    }

    async fn update_booking_status(
        &self,
        booking_id: i64,
        status: StatusUpdate,
    ) -> Result<(), GatewayError> {
        self.call_ack(
            "updateBookingStatus",
            json!({ "bookingId": booking_id, "status": status.as_str() }),
        )
        .await
    }

    async fn save_room(&self, payload: &RoomPayload) -> Result<Room, GatewayError> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        self.call("saveRoom", payload).await
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), GatewayError> {
        self.call_ack("deleteRoom", json!({ "roomId": room_id })).await
    }

    async fn update_settings(
        &self,
        payload: &SettingsPayload,
    ) -> Result<AppSettings, GatewayError> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        self.call("updateSettings", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_success() {
        let env: Envelope<Vec<Room>> =
            serde_json::from_str(r#"{"success":true,"data":[]}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().len(), 0);
    }

    #[test]
    fn test_envelope_decodes_failure() {
        let env: Envelope<Vec<Room>> =
            serde_json::from_str(r#"{"success":false,"error":"sheet locked"}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("sheet locked"));
    }

    #[test]
    fn test_status_update_wire_names() {
        assert_eq!(StatusUpdate::Confirmed.as_str(), "confirmed");
        assert_eq!(StatusUpdate::Declined.as_str(), "declined");
    }
}
