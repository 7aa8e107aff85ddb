//! Declarative payload-to-placeholder tables.
//!
//! Every template uses its own placeholder names, some of them phrases with
//! spaces (`Estado Civil`) or slashes (`DD/MM/AAAA`). Each table lists, in
//! order, which payload field feeds which placeholder and whether the value
//! goes through the currency formatter first. The tables are part of the
//! template contract: renaming an entry breaks the matching template.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::currency::format_currency;
use crate::error::{Error, Result};
use crate::models::DocumentKind;

/// Placeholder name to display value, ready for substitution.
pub type FieldValues = BTreeMap<String, String>;

/// How a payload value is turned into placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Strings as-is; other JSON values as their JSON text.
    Verbatim,
    /// Through [`format_currency`].
    Currency,
}

/// One `(source field, placeholder, transform)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: &'static str,
    pub placeholder: &'static str,
    pub transform: Transform,
}

const fn plain(source: &'static str, placeholder: &'static str) -> FieldMapping {
    FieldMapping {
        source,
        placeholder,
        transform: Transform::Verbatim,
    }
}

const fn money(source: &'static str, placeholder: &'static str) -> FieldMapping {
    FieldMapping {
        source,
        placeholder,
        transform: Transform::Currency,
    }
}

/// `template-cessao-rpv.docx`
pub const CONTRACT_MAP: &[FieldMapping] = &[
    plain("cedente_nome", "nome_cedente"),
    plain("cedente_cpf", "cpf_cedente"),
    plain("cedente_rg", "rg_cedente"),
    plain("cedente_nacionalidade", "nacionalidade_cedente"),
    plain("cedente_profissao", "profissao_cedente"),
    plain("cedente_estado_civil", "estado_civil_cedente"),
    plain("cedente_endereco", "endereco_cedente"),
    plain("cedente_cep", "cep_cedente"),
    plain("cedente_cidade", "cidade_cedente"),
    plain("cedente_uf", "uf_cedente"),
    plain("processo_numero", "numero_processo"),
    plain("processo_devedor", "devedor"),
    money("processo_valor_bruto", "valor_bruto"),
    money("processo_valor_liquido", "valor_liquido"),
];

/// `template-procuracao-adjudicia.docx`
pub const POWER_OF_ATTORNEY_MAP: &[FieldMapping] = &[
    plain("outorgante_nome", "Nome"),
    plain("outorgante_nacionalidade", "Nacionalidade"),
    plain("outorgante_estado_civil", "Estado Civil"),
    plain("outorgante_profissao", "Profissao"),
    plain("outorgante_rg", "RG"),
    plain("outorgante_cpf", "CPF"),
    plain("outorgante_data_nasc", "Data Nasc"),
    plain("outorgante_endereco", "Endereco"),
    plain("outorgante_cep", "CEP"),
    plain("proc_numero", "Numero Processo"),
    plain("proc_local", "Local"),
    plain("proc_data", "Data"),
];

/// `template-dec-ciencia-concord.docx`
pub const ACKNOWLEDGMENT_MAP: &[FieldMapping] = &[
    plain("cedente2_nome", "Nome"),
    plain("cedente2_nacionalidade", "nacionalidade"),
    plain("cedente2_profissao", "Profissao"),
    plain("cedente2_estado_civil", "Estado Civil"),
    plain("cedente2_rg", "RG"),
    plain("cedente2_cpf", "CPF"),
    plain("cedente2_data_nasc", "Data"),
    plain("cedente2_endereco", "Endereco"),
    plain("cedente2_cep", "CEP"),
    plain("cessionario2_nome", "Nome_Cessionario"),
    plain("cessionario2_profissao", "Profissao_Cessionario"),
    plain("cessionario2_cpf", "CPF_Cessionario"),
    plain("cessionario2_rg", "RG_Cessionario"),
    plain("cessionario2_endereco", "Endereco_Cessionario"),
    plain("cessionario2_cep", "CEP_Cessionario"),
    plain("proc2_numero", "Numero"),
    money("proc2_valor_bruto", "Valor_Bruto"),
    money("proc2_valor_liquido", "Valor_Liquido"),
    plain("proc2_advogado", "Nome Advogado"),
    plain("proc2_agencia", "Agencia"),
    plain("proc2_conta", "Conta"),
    plain("proc2_banco", "Banco"),
    plain("proc2_data", "Data_Final"),
];

/// `template-dec-quitacao.docx`
pub const DECLARATION_MAP: &[FieldMapping] = &[
    plain("decl_nome", "Nome"),
    plain("decl_nacionalidade", "Nacionalidade"),
    plain("decl_estado_civil", "Estado Civil"),
    plain("decl_profissao", "Profissao"),
    plain("decl_rg", "RG"),
    plain("decl_cpf", "CPF"),
    plain("decl_data_nasc", "Data"),
    plain("decl_endereco", "Endereco"),
    plain("decl_cep", "CEP"),
    plain("decl_data_negociacao", "DD/MM/AAAA"),
    plain("decl_processo", "Numero Processo"),
    plain("decl_estado_devedor", "Estado"),
    plain("decl_unidade", "Vara/Unidade"),
    plain("decl_comarca", "Comarca"),
    plain("decl_processo_origem", "Numero Processo Origem"),
    plain("decl_local", "Local"),
    plain("decl_data", "Data_Final"),
];

/// Mapping table for a kind's template.
pub fn field_map(kind: DocumentKind) -> &'static [FieldMapping] {
    match kind {
        DocumentKind::Contract => CONTRACT_MAP,
        DocumentKind::PowerOfAttorney => POWER_OF_ATTORNEY_MAP,
        DocumentKind::Acknowledgment => ACKNOWLEDGMENT_MAP,
        DocumentKind::DeclarationOfSettlement => DECLARATION_MAP,
    }
}

impl Transform {
    fn apply(self, value: &JsonValue) -> String {
        match (self, value) {
            (Transform::Currency, v) => format_currency(v),
            (Transform::Verbatim, JsonValue::String(s)) => s.clone(),
            (Transform::Verbatim, v) => v.to_string(),
        }
    }
}

/// Build the placeholder values for `kind` from a validated payload object.
///
/// A source field missing from the payload means the table and the schema
/// disagree, which is reported as an internal error.
pub fn build_field_values(kind: DocumentKind, payload: &JsonValue) -> Result<FieldValues> {
    field_map(kind)
        .iter()
        .map(|entry| {
            let value = payload.get(entry.source).ok_or_else(|| {
                Error::Internal(format!(
                    "{} payload has no field `{}` for placeholder `{}`",
                    kind, entry.source, entry.placeholder
                ))
            })?;
            Ok((entry.placeholder.to_string(), entry.transform.apply(value)))
        })
        .collect()
}
