//! Validation utilities for the Agroinversiones Beto management platform
//!
//! Includes Peru-specific validations for the fields operators actually
//! mistype: truck plates, WhatsApp numbers and conversion factors.

/// Validate a truck plate identifier (trimmed, at least 3 characters)
pub fn validate_truck_plate(plate: &str) -> Result<(), &'static str> {
    if plate.trim().len() < 3 {
        return Err("Truck plate must be at least 3 characters");
    }
    Ok(())
}

/// Validate a Peruvian mobile number for WhatsApp
/// Accepts: 987654321, 987-654-321, +51987654321
pub fn validate_peru_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Peruvian mobile: 9 digits starting with 9
    if digits.len() == 9 && digits.starts_with('9') {
        return Ok(());
    }
    // International format with country code: 11 digits starting with 51
    if digits.len() == 11 && digits.starts_with("519") {
        return Ok(());
    }

    Err("Invalid Peruvian mobile number format")
}

/// Validate a conversion factor (kg per java): finite and greater than zero
pub fn validate_conversion_factor(factor: f64) -> Result<(), &'static str> {
    if !factor.is_finite() {
        return Err("Conversion factor must be a finite number");
    }
    if factor <= 0.0 {
        return Err("Conversion factor must be greater than 0");
    }
    Ok(())
}

/// Validate a quantity or price: finite and greater than zero
pub fn validate_positive_amount(amount: f64) -> Result<(), &'static str> {
    if !amount.is_finite() {
        return Err("Amount must be a finite number");
    }
    if amount <= 0.0 {
        return Err("Amount must be greater than 0");
    }
    Ok(())
}

/// Validate a username (3-32 chars, lowercase alphanumeric plus . _ -)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
    {
        return Err("Username must be lowercase alphanumeric with . _ -");
    }
    Ok(())
}
