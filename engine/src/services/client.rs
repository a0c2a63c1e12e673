//! Client and debt management service

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Client, ClientPayment};
use shared::validation::validate_peru_phone;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Input for registering a client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientInput {
    pub name: String,
    pub whatsapp_number: Option<String>,
}

/// Input for updating a client; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientInput {
    pub name: Option<String>,
    pub whatsapp_number: Option<String>,
}

/// Input for recording a debt payment
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentInput {
    pub amount: Decimal,
    pub notes: Option<String>,
}

/// Clients, their payments and outstanding debt
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn Store>,
}

impl ClientService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create_client(&self, input: CreateClientInput) -> AppResult<Client> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Client name is required".to_string(),
                message_es: "El nombre del cliente es requerido".to_string(),
            });
        }
        let whatsapp_number = self.check_phone(input.whatsapp_number)?;

        let client = Client {
            id: Uuid::new_v4(),
            name,
            whatsapp_number,
            current_debt: Decimal::ZERO,
        };
        self.store.insert_client(client.clone())?;

        tracing::info!(client = %client.name, "created client");
        Ok(client)
    }

    pub fn update_client(&self, id: Uuid, input: UpdateClientInput) -> AppResult<Client> {
        let mut client = self.get_client(id)?;

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: "Client name is required".to_string(),
                    message_es: "El nombre del cliente es requerido".to_string(),
                });
            }
            client.name = name;
        }
        if input.whatsapp_number.is_some() {
            client.whatsapp_number = self.check_phone(input.whatsapp_number)?;
        }

        self.store.update_client(client.clone())?;
        Ok(client)
    }

    pub fn get_client(&self, id: Uuid) -> AppResult<Client> {
        self.store.client(id)?.ok_or_else(|| AppError::NotFound {
            resource: "Cliente".to_string(),
            id: Some(id),
        })
    }

    /// All clients ordered by name
    pub fn list_clients(&self) -> AppResult<Vec<Client>> {
        let mut clients = self.store.clients()?;
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    /// Record a payment against a client's debt. The debt never goes
    /// below zero; an overpayment settles it completely.
    pub fn record_payment(
        &self,
        client_id: Uuid,
        input: RecordPaymentInput,
    ) -> AppResult<ClientPayment> {
        if input.amount <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: "Payment amount must be greater than 0".to_string(),
                message_es: "El monto del pago debe ser mayor a 0".to_string(),
            });
        }

        let mut client = self.get_client(client_id)?;
        let previous_debt = client.current_debt;
        client.current_debt = (client.current_debt - input.amount).max(Decimal::ZERO);
        self.store.update_client(client.clone())?;

        let payment = ClientPayment {
            id: Uuid::new_v4(),
            client_id,
            amount: input.amount,
            date: Utc::now(),
            notes: input.notes,
        };
        self.store.insert_payment(payment.clone())?;

        tracing::info!(
            client = %client.name,
            amount = %input.amount,
            debt = %client.current_debt,
            previous_debt = %previous_debt,
            "recorded client payment"
        );
        Ok(payment)
    }

    /// Payment history for a client, newest first
    pub fn payments(&self, client_id: Uuid) -> AppResult<Vec<ClientPayment>> {
        // Surface unknown clients instead of returning an empty history
        self.get_client(client_id)?;
        let mut payments = self.store.payments_for_client(client_id)?;
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }

    /// Clients with outstanding debt, largest debt first
    pub fn debtors(&self) -> AppResult<Vec<Client>> {
        let mut debtors: Vec<Client> = self
            .store
            .clients()?
            .into_iter()
            .filter(|c| c.current_debt > Decimal::ZERO)
            .collect();
        debtors.sort_by(|a, b| b.current_debt.cmp(&a.current_debt));
        Ok(debtors)
    }

    fn check_phone(&self, phone: Option<String>) -> AppResult<Option<String>> {
        match phone {
            Some(number) => {
                let number = number.trim().to_string();
                if number.is_empty() {
                    return Ok(None);
                }
                validate_peru_phone(&number).map_err(|message| AppError::Validation {
                    field: "whatsapp_number".to_string(),
                    message: message.to_string(),
                    message_es: "Número de WhatsApp inválido".to_string(),
                })?;
                Ok(Some(number))
            }
            None => Ok(None),
        }
    }
}
