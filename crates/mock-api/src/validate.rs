//! Constraint validation for the fixture endpoints
//!
//! The rules here are deliberately stricter than the specification the
//! target program starts from; the discrepancies are what adaptive runs are
//! expected to discover. Error messages are part of the fixture contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid pattern")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("valid pattern"));

/// A field counts as provided when it is present, non-null, and non-empty.
fn provided(data: &Value, key: &str) -> bool {
    match data.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}

fn str_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as i64),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `POST /users`: required fields, conditional requirement, mutual
/// exclusivity, format dependency, and two business rules.
pub fn create_user(data: &Value) -> Result<Value, String> {
    if !provided(data, "name") {
        return Err("name field is required".to_string());
    }
    if !provided(data, "username") {
        return Err("username field is required".to_string());
    }

    // email required when account_type is 'premium'
    if str_field(data, "account_type") == Some("premium") && !provided(data, "email") {
        return Err("email is required when account_type is 'premium'".to_string());
    }

    // either email or phone, never both
    let has_email = provided(data, "email");
    let has_phone = provided(data, "phone");
    if has_email && has_phone {
        return Err(
            "Cannot specify both email and phone. Please provide only one contact method."
                .to_string(),
        );
    }
    if !has_email && !has_phone {
        return Err("Either email or phone must be provided as contact method".to_string());
    }

    // email format enforced when contact_type is 'email'
    if str_field(data, "contact_type") == Some("email") {
        let email = str_field(data, "email").unwrap_or("");
        if !EMAIL_RE.is_match(email) {
            return Err("Valid email format required when contact_type is 'email'".to_string());
        }
    }

    if let Some(age) = data.get("age") {
        let age = parse_int(age).ok_or_else(|| "age must be a valid number".to_string())?;
        if age < 18 {
            return Err("age must be at least 18 for account creation".to_string());
        }
    }

    let username = str_field(data, "username").unwrap_or("");
    if !USERNAME_RE.is_match(username) {
        return Err(
            "username must be 3-20 characters and contain only letters, numbers, and underscores"
                .to_string(),
        );
    }

    let mut user = json!({
        "id": 123,
        "name": data.get("name"),
        "username": data.get("username"),
        "account_type": str_field(data, "account_type").unwrap_or("basic"),
        "contact_method": if has_email { "email" } else { "phone" },
    });
    if has_email {
        user["email"] = data["email"].clone();
    }
    if has_phone {
        user["phone"] = data["phone"].clone();
    }
    Ok(user)
}

/// `POST /orders`: conditional billing address and a positive-amount rule.
pub fn create_order(data: &Value) -> Result<Value, String> {
    if str_field(data, "payment_method") == Some("credit_card") && !provided(data, "billing_address")
    {
        return Err("billing_address is required when payment_method is 'credit_card'".to_string());
    }

    if let Some(amount) = data.get("total_amount") {
        let amount =
            parse_float(amount).ok_or_else(|| "total_amount must be a valid number".to_string())?;
        if amount <= 0.0 {
            return Err("total_amount must be greater than 0".to_string());
        }
    }

    Ok(json!({
        "id": 456,
        "status": "created",
        "total_amount": data.get("total_amount").cloned().unwrap_or(json!(0)),
        "payment_method": str_field(data, "payment_method").unwrap_or("cash"),
    }))
}

/// `POST /products`: email format check only, and only when the field is
/// present at all.
pub fn create_product(data: &Value) -> Result<Value, String> {
    if let Some(value) = data.get("contact_email") {
        let email = value.as_str().unwrap_or("");
        if !EMAIL_RE.is_match(email) {
            return Err("contact_email must be a valid email format".to_string());
        }
    }

    Ok(json!({
        "id": 789,
        "name": data.get("name").cloned().unwrap_or(json!("Default Product")),
        "contact_email": data.get("contact_email"),
        "created_at": "2025-08-01T10:00:00Z",
    }))
}

/// `POST /profiles`: one required field.
pub fn create_profile(data: &Value) -> Result<Value, String> {
    if !provided(data, "username") {
        return Err("username field is required".to_string());
    }

    Ok(json!({
        "id": 101,
        "username": data.get("username"),
        "bio": data.get("bio").cloned().unwrap_or(json!("")),
        "created_at": "2025-08-01T10:00:00Z",
    }))
}
