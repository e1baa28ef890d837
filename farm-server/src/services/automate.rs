//! AutomateService — best-effort outbound event notifications
//!
//! Fires webhook POSTs on signup, login and order creation. Every call is
//! spawned off the request path: failures are logged and swallowed, and the
//! primary response is never delayed or affected.

use reqwest::Client;

use crate::db::models::Order;

/// Webhook notifier for login/signup/order events
#[derive(Clone, Debug)]
pub struct AutomateService {
    client: Client,
    user_event_url: Option<String>,
    order_event_url: Option<String>,
}

impl AutomateService {
    pub fn new(user_event_url: Option<String>, order_event_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            user_event_url,
            order_event_url,
        }
    }

    /// Notify the user-event webhook about a signup
    pub fn notify_signup(&self, name: &str, email: &str, role: &str) {
        self.post_user_event(serde_json::json!({
            "type": "signup",
            "name": name,
            "email": email,
            "role": role,
            "time": chrono::Utc::now().to_rfc3339(),
        }));
    }

    /// Notify the user-event webhook about a login
    pub fn notify_login(&self, name: &str, email: &str, role: &str) {
        self.post_user_event(serde_json::json!({
            "type": "login",
            "name": name,
            "email": email,
            "role": role,
            "time": chrono::Utc::now().to_rfc3339(),
        }));
    }

    /// Notify the order-event webhook about a placed order
    pub fn notify_order(&self, order: &Order) {
        let Some(url) = self.order_event_url.clone() else {
            return;
        };

        let shipping = &order.shipping_details;
        let shipping_address = format!(
            "{}, {}, {} - {}",
            shipping.address, shipping.city, shipping.state, shipping.pincode
        );

        let payload = serde_json::json!({
            "type": "order",
            "orderId": order.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            "customerName": order.customer_name,
            "customerEmail": order.customer_email,
            "totalAmount": order.total_amount,
            "paymentMethod": order.payment_method,
            "summary": build_order_summary(order),
            "shippingAddress": shipping_address,
            "time": chrono::Utc::now().to_rfc3339(),
        });

        self.spawn_post(url, payload, "order");
    }

    fn post_user_event(&self, payload: serde_json::Value) {
        let Some(url) = self.user_event_url.clone() else {
            return;
        };
        self.spawn_post(url, payload, "user");
    }

    /// Fire-and-forget POST; errors are logged, never propagated
    fn spawn_post(&self, url: String, payload: serde_json::Value, kind: &'static str) {
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.post(&url).json(&payload).send().await {
                tracing::warn!(target: "automate", kind, error = %e, "Automate alert failed");
            }
        });
    }
}

/// Build a readable line-item summary for the order alert
///
/// ```text
/// 2 x Tomatoes – ₹100 each (₹200)
/// 1 x Honey – ₹50 each (₹50)
///
/// Total items: 3
/// ```
pub fn build_order_summary(order: &Order) -> String {
    let mut lines: Vec<String> = order
        .products
        .iter()
        .map(|item| {
            format!(
                "{} x {} – ₹{} each (₹{})",
                item.quantity,
                item.name,
                item.price,
                item.price * item.quantity as f64
            )
        })
        .collect();

    let total_items: i64 = order.products.iter().map(|item| item.quantity).sum();

    lines.push(String::new());
    lines.push(format!("Total items: {}", total_items));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{LineItem, ShippingDetails};

    fn sample_order() -> Order {
        Order {
            id: None,
            customer_id: "user:buyer".to_string(),
            customer_name: "Asha".to_string(),
            customer_email: "asha@example.com".to_string(),
            products: vec![
                LineItem {
                    product_id: "product:a".to_string(),
                    seller_id: "user:seller".to_string(),
                    name: "Tomatoes".to_string(),
                    price: 100.0,
                    quantity: 2,
                },
                LineItem {
                    product_id: "product:b".to_string(),
                    seller_id: "user:seller".to_string(),
                    name: "Honey".to_string(),
                    price: 50.0,
                    quantity: 1,
                },
            ],
            total_amount: 250.0,
            shipping_details: ShippingDetails::default(),
            payment_method: "COD".to_string(),
            status: "Pending".to_string(),
            is_delivered: false,
            delivered_at: None,
            rating: None,
            created_at: None,
        }
    }

    #[test]
    fn summary_lists_items_and_total_count() {
        let summary = build_order_summary(&sample_order());
        assert!(summary.contains("2 x Tomatoes – ₹100 each (₹200)"));
        assert!(summary.contains("1 x Honey – ₹50 each (₹50)"));
        assert!(summary.ends_with("Total items: 3"));
    }

    #[tokio::test]
    async fn unconfigured_notifier_is_a_no_op() {
        let service = AutomateService::new(None, None);
        // Nothing to assert beyond "does not panic or block"
        service.notify_signup("Asha", "asha@example.com", "buyer");
        service.notify_order(&sample_order());
    }
}
