//! Inbound payload schemas, one per document kind.
//!
//! Each payload is a flat record of required fields. Validation is purely
//! shape-based: every field must be present, numeric fields must be numbers
//! (or strings that parse as numbers), and all other fields must be strings.
//! Unknown extra fields are ignored.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::models::DocumentKind;

/// Primitive type a payload field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
}

/// One required field of a payload schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::Text,
    }
}

const fn number(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::Number,
    }
}

/// A typed payload for one document kind.
pub trait DocumentPayload: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind this payload generates.
    const KIND: DocumentKind;

    /// Required fields, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Name of the document's primary subject, used for the log and download name.
    fn principal_name(&self) -> &str;
}

/// Validate a raw JSON body against `P`'s schema and deserialize it.
///
/// Returns [`Error::Validation`] naming the first offending field.
pub fn parse_payload<P: DocumentPayload>(body: &JsonValue) -> Result<P> {
    validate_fields(body, P::FIELDS)?;
    serde_json::from_value(body.clone()).map_err(|e| Error::Validation(e.to_string()))
}

fn validate_fields(body: &JsonValue, fields: &[FieldSpec]) -> Result<()> {
    let object = body
        .as_object()
        .ok_or_else(|| Error::Validation("request body must be a JSON object".to_string()))?;

    for spec in fields {
        let value = object
            .get(spec.name)
            .ok_or_else(|| Error::Validation(format!("missing required field `{}`", spec.name)))?;

        match spec.field_type {
            FieldType::Text if !value.is_string() => {
                return Err(Error::Validation(format!(
                    "field `{}` must be a string",
                    spec.name
                )));
            }
            FieldType::Number if parse_number(value).is_none() => {
                return Err(Error::Validation(format!(
                    "field `{}` must be a number",
                    spec.name
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    parse_number(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value)))
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Credit assignment contract: assignor identity plus the court process values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContractPayload {
    pub cedente_nome: String,
    pub cedente_cpf: String,
    pub cedente_rg: String,
    pub cedente_nacionalidade: String,
    pub cedente_profissao: String,
    pub cedente_estado_civil: String,
    pub cedente_endereco: String,
    pub cedente_cep: String,
    pub cedente_cidade: String,
    pub cedente_uf: String,
    pub processo_numero: String,
    pub processo_devedor: String,
    #[serde(deserialize_with = "lenient_number")]
    pub processo_valor_bruto: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub processo_valor_liquido: f64,
}

impl DocumentPayload for ContractPayload {
    const KIND: DocumentKind = DocumentKind::Contract;
    const FIELDS: &'static [FieldSpec] = &[
        text("cedente_nome"),
        text("cedente_cpf"),
        text("cedente_rg"),
        text("cedente_nacionalidade"),
        text("cedente_profissao"),
        text("cedente_estado_civil"),
        text("cedente_endereco"),
        text("cedente_cep"),
        text("cedente_cidade"),
        text("cedente_uf"),
        text("processo_numero"),
        text("processo_devedor"),
        number("processo_valor_bruto"),
        number("processo_valor_liquido"),
    ];

    fn principal_name(&self) -> &str {
        &self.cedente_nome
    }
}

// =============================================================================
// POWER OF ATTORNEY
// =============================================================================

/// Power of attorney: grantor identity plus process, place, and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PowerOfAttorneyPayload {
    pub outorgante_nome: String,
    pub outorgante_cpf: String,
    pub outorgante_rg: String,
    pub outorgante_nacionalidade: String,
    pub outorgante_profissao: String,
    pub outorgante_estado_civil: String,
    pub outorgante_endereco: String,
    pub outorgante_cep: String,
    pub outorgante_data_nasc: String,
    pub proc_numero: String,
    pub proc_local: String,
    pub proc_data: String,
}

impl DocumentPayload for PowerOfAttorneyPayload {
    const KIND: DocumentKind = DocumentKind::PowerOfAttorney;
    const FIELDS: &'static [FieldSpec] = &[
        text("outorgante_nome"),
        text("outorgante_cpf"),
        text("outorgante_rg"),
        text("outorgante_nacionalidade"),
        text("outorgante_profissao"),
        text("outorgante_estado_civil"),
        text("outorgante_endereco"),
        text("outorgante_cep"),
        text("outorgante_data_nasc"),
        text("proc_numero"),
        text("proc_local"),
        text("proc_data"),
    ];

    fn principal_name(&self) -> &str {
        &self.outorgante_nome
    }
}

// =============================================================================
// ACKNOWLEDGMENT
// =============================================================================

/// Acknowledgment declaration: assignor, assignee, process values, and bank details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AcknowledgmentPayload {
    pub cedente2_nome: String,
    pub cedente2_cpf: String,
    pub cedente2_rg: String,
    pub cedente2_nacionalidade: String,
    pub cedente2_profissao: String,
    pub cedente2_estado_civil: String,
    pub cedente2_endereco: String,
    pub cedente2_cep: String,
    pub cedente2_data_nasc: String,
    pub cessionario2_nome: String,
    pub cessionario2_cpf: String,
    pub cessionario2_rg: String,
    pub cessionario2_profissao: String,
    pub cessionario2_endereco: String,
    pub cessionario2_cep: String,
    pub proc2_numero: String,
    #[serde(deserialize_with = "lenient_number")]
    pub proc2_valor_bruto: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub proc2_valor_liquido: f64,
    pub proc2_advogado: String,
    pub proc2_banco: String,
    pub proc2_agencia: String,
    pub proc2_conta: String,
    pub proc2_data: String,
}

impl DocumentPayload for AcknowledgmentPayload {
    const KIND: DocumentKind = DocumentKind::Acknowledgment;
    const FIELDS: &'static [FieldSpec] = &[
        text("cedente2_nome"),
        text("cedente2_cpf"),
        text("cedente2_rg"),
        text("cedente2_nacionalidade"),
        text("cedente2_profissao"),
        text("cedente2_estado_civil"),
        text("cedente2_endereco"),
        text("cedente2_cep"),
        text("cedente2_data_nasc"),
        text("cessionario2_nome"),
        text("cessionario2_cpf"),
        text("cessionario2_rg"),
        text("cessionario2_profissao"),
        text("cessionario2_endereco"),
        text("cessionario2_cep"),
        text("proc2_numero"),
        number("proc2_valor_bruto"),
        number("proc2_valor_liquido"),
        text("proc2_advogado"),
        text("proc2_banco"),
        text("proc2_agencia"),
        text("proc2_conta"),
        text("proc2_data"),
    ];

    fn principal_name(&self) -> &str {
        &self.cedente2_nome
    }
}

// =============================================================================
// DECLARATION OF SETTLEMENT
// =============================================================================

/// Declaration of settlement: declarant identity plus negotiation and court details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeclarationPayload {
    pub decl_nome: String,
    pub decl_cpf: String,
    pub decl_rg: String,
    pub decl_nacionalidade: String,
    pub decl_profissao: String,
    pub decl_estado_civil: String,
    pub decl_endereco: String,
    pub decl_cep: String,
    pub decl_data_nasc: String,
    pub decl_data_negociacao: String,
    pub decl_processo: String,
    pub decl_estado_devedor: String,
    pub decl_unidade: String,
    pub decl_comarca: String,
    pub decl_processo_origem: String,
    pub decl_local: String,
    pub decl_data: String,
}

impl DocumentPayload for DeclarationPayload {
    const KIND: DocumentKind = DocumentKind::DeclarationOfSettlement;
    const FIELDS: &'static [FieldSpec] = &[
        text("decl_nome"),
        text("decl_cpf"),
        text("decl_rg"),
        text("decl_nacionalidade"),
        text("decl_profissao"),
        text("decl_estado_civil"),
        text("decl_endereco"),
        text("decl_cep"),
        text("decl_data_nasc"),
        text("decl_data_negociacao"),
        text("decl_processo"),
        text("decl_estado_devedor"),
        text("decl_unidade"),
        text("decl_comarca"),
        text("decl_processo_origem"),
        text("decl_local"),
        text("decl_data"),
    ];

    fn principal_name(&self) -> &str {
        &self.decl_nome
    }
}

/// Schema fields for a kind, without naming its payload type.
pub fn fields_for(kind: DocumentKind) -> &'static [FieldSpec] {
    match kind {
        DocumentKind::Contract => ContractPayload::FIELDS,
        DocumentKind::PowerOfAttorney => PowerOfAttorneyPayload::FIELDS,
        DocumentKind::Acknowledgment => AcknowledgmentPayload::FIELDS,
        DocumentKind::DeclarationOfSettlement => DeclarationPayload::FIELDS,
    }
}
