//! Entry payload validation.
//!
//! Payloads arrive as raw JSON so that every offending field can be reported
//! at once, each with its own location and message.

use chrono::NaiveDate;
use financas_shared::FieldError;
use financas_shared::types::money::{decimal_from_json, round_money, to_cents};
use financas_shared::types::{CategoryId, Competencia, PaymentMethodId};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::types::{
    EntryDetail, EntryKind, Income, InstallmentPurchase, NewEntry, RecurringExpense,
};

/// Display format reported for malformed dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format reported for malformed competências in a body.
pub const COMPETENCIA_FORMAT: &str = "%Y-%m";

/// Field-by-field collector of validation failures.
pub(crate) struct FieldValidator<'a> {
    location: &'static str,
    payload: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldValidator<'a> {
    pub(crate) const fn new(location: &'static str, payload: &'a Map<String, Value>) -> Self {
        Self {
            location,
            payload,
            errors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, field: &str, msg: impl Into<String>, kind: &str) {
        self.errors
            .push(FieldError::new(&[self.location, field], msg, kind));
    }

    pub(crate) fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn present(&mut self, field: &str) -> Option<&'a Value> {
        let payload: &'a Map<String, Value> = self.payload;
        let value = payload.get(field);
        if value.is_none() {
            self.push(field, "campo obrigatorio", "value_error.missing");
        }
        value
    }

    pub(crate) fn string(&mut self, field: &str) -> Option<&'a str> {
        let value = self.present(field)?;
        let Some(text) = value.as_str() else {
            self.push(field, "deve ser string", "type_error.string");
            return None;
        };
        if text.trim().is_empty() {
            self.push(field, "nao pode ser vazio", "value_error");
            return None;
        }
        Some(text)
    }

    fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let text = self.string(field)?;
        let parsed = has_date_shape(text)
            .then(|| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
            .flatten();
        if parsed.is_none() {
            self.push(
                field,
                format!("formato invalido ({DATE_FORMAT})"),
                "value_error",
            );
        }
        parsed
    }

    fn competencia(&mut self, field: &str) -> Option<Competencia> {
        let text = self.string(field)?;
        let parsed = text.parse::<Competencia>().ok();
        if parsed.is_none() {
            self.push(
                field,
                format!("formato invalido ({COMPETENCIA_FORMAT})"),
                "value_error",
            );
        }
        parsed
    }

    fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let text = self.string(field)?;
        let parsed = Uuid::parse_str(text).ok();
        if parsed.is_none() {
            self.push(field, "uuid invalido", "value_error");
        }
        parsed
    }

    fn money(&mut self, field: &str) -> Option<Decimal> {
        let value = self.present(field)?;
        let Some(number) = value.as_number() else {
            self.push(field, "deve ser numero", "type_error.number");
            return None;
        };
        let Some(amount) = decimal_from_json(number) else {
            self.push(field, "valor fora do intervalo suportado", "value_error");
            return None;
        };
        if amount < Decimal::ZERO {
            self.push(field, "deve ser maior ou igual a zero", "value_error");
            return None;
        }
        if to_cents(amount).is_none() {
            self.push(field, "valor fora do intervalo suportado", "value_error");
            return None;
        }
        Some(round_money(amount))
    }

    fn integer(&mut self, field: &str) -> Option<i64> {
        let value = self.present(field)?;
        let parsed = value.as_i64();
        if parsed.is_none() {
            self.push(field, "deve ser inteiro", "type_error.integer");
        }
        parsed
    }

    fn boolean(&mut self, field: &str) -> Option<bool> {
        let value = self.present(field)?;
        let parsed = value.as_bool();
        if parsed.is_none() {
            self.push(field, "deve ser booleano", "type_error.bool");
        }
        parsed
    }
}

/// `^\d{4}-\d{2}-\d{2}$`
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Rejects anything that is not a JSON object.
pub(crate) fn require_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    payload.as_object().ok_or_else(|| {
        vec![FieldError::new(&["body"], "deve ser objeto JSON", "type_error.object")]
    })
}

/// Validates a raw entry payload.
///
/// Common fields (`nome`, `data`, `competencia`, `tipo_lancamento`) are
/// checked first; type-specific fields are only checked once those pass.
///
/// # Errors
///
/// Returns every field error found in the failing stage.
pub fn validate_new_entry(payload: &Value) -> Result<NewEntry, Vec<FieldError>> {
    let object = require_object(payload)?;
    let mut v = FieldValidator::new("body", object);

    let name = v.string("nome");
    let date = v.date("data");
    let competencia = v.competencia("competencia");
    let kind = v.string("tipo_lancamento").and_then(|raw| {
        let kind = raw.parse::<EntryKind>().ok();
        if kind.is_none() {
            v.push("tipo_lancamento", "tipo_lancamento invalido", "value_error");
        }
        kind
    });

    let (Some(name), Some(date), Some(competencia), Some(kind)) = (name, date, competencia, kind)
    else {
        return Err(v.into_errors());
    };

    let detail = match kind {
        EntryKind::Entrada => {
            let amount = v.money("valor");
            match amount {
                Some(amount) => EntryDetail::Income(Income { amount }),
                None => return Err(v.into_errors()),
            }
        }
        EntryKind::Fixo | EntryKind::Variavel => {
            let category_id = v.uuid("categoria_id");
            let payment_method_id = v.uuid("forma_pagamento_id");
            let amount = v.money("valor");
            let paid = v.boolean("pago");
            let (Some(category_id), Some(payment_method_id), Some(amount), Some(paid)) =
                (category_id, payment_method_id, amount, paid)
            else {
                return Err(v.into_errors());
            };
            let expense = RecurringExpense {
                category_id: CategoryId::from_uuid(category_id),
                payment_method_id: PaymentMethodId::from_uuid(payment_method_id),
                amount,
                paid,
            };
            if kind == EntryKind::Fixo {
                EntryDetail::Fixed(expense)
            } else {
                EntryDetail::Variable(expense)
            }
        }
        EntryKind::Parcelado => {
            let category_id = v.uuid("categoria_id");
            let payment_method_id = v.uuid("forma_pagamento_id");
            let total_amount = v.money("valor_total");
            let installments = v.integer("numero_parcelas").and_then(|n| {
                if n < 1 {
                    v.push(
                        "numero_parcelas",
                        "deve ser maior ou igual a 1",
                        "value_error",
                    );
                    return None;
                }
                // Stored as a 32-bit signed column.
                let n = i32::try_from(n).ok().and_then(|n| u32::try_from(n).ok());
                if n.is_none() {
                    v.push(
                        "numero_parcelas",
                        "valor fora do intervalo suportado",
                        "value_error",
                    );
                }
                n
            });
            let (
                Some(category_id),
                Some(payment_method_id),
                Some(total_amount),
                Some(installments),
            ) = (category_id, payment_method_id, total_amount, installments)
            else {
                return Err(v.into_errors());
            };
            EntryDetail::Installment(InstallmentPurchase {
                category_id: CategoryId::from_uuid(category_id),
                payment_method_id: PaymentMethodId::from_uuid(payment_method_id),
                total_amount,
                installments,
            })
        }
    };

    Ok(NewEntry {
        name: name.to_string(),
        date,
        competencia,
        detail,
    })
}
