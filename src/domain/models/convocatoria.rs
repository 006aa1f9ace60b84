use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::services::fields::{NOT_SPECIFIED, find_present, first_present, format_fecha};

const ID_FIELDS: &[&str] = &["BDNS", "idConvocatoria", "id", "numeroConvocatoria"];
const TITLE_FIELDS: &[&str] = &["tituloConvocatoria", "titulo", "descripcion"];
const ORGANISM_FIELDS: &[&str] = &["organsimo", "organo", "nivel3", "nivel2"];
const SUMMARY_DATE_FIELDS: &[&str] = &[
    "fechaRegistroDesdeSolicitingToolDate",
    "fechaPublicacion",
    "fecha",
    "fechaRecepcion",
];
const DETAIL_DATE_FIELDS: &[&str] = &[
    "fechaPublicacion",
    "fechaRegistroDesdeSolicitingToolDate",
    "fechaCreacionBDNS",
    "fechaRecepcion",
];
const DESCRIPTION_FIELDS: &[&str] = &["objetivo", "descripcion"];
const BENEFICIARIES_FIELDS: &[&str] = &["beneficiarios"];
const AMOUNT_FIELDS: &[&str] = &["cuantia", "presupuestoTotal"];
const DEADLINE_START_FIELDS: &[&str] = &["fechaInicioPlazoSolicitud", "fechaInicioSolicitud"];
const DEADLINE_END_FIELDS: &[&str] = &["fechaFinPlazoSolicitud", "fechaFinSolicitud"];
const URL_FIELDS: &[&str] = &[
    "urlMasInformacion",
    "urlDetalle",
    "urlSedeElectronicaConvocatoria",
    "sedeElectronica",
];

/// Grant call record as returned by the search and detail endpoints
///
/// The payload schema drifts between endpoints, so the raw object is kept and
/// every concept is read through an ordered fallback chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Convocatoria(Map<String, Value>);

/// Entry of a search result list
pub type ConvocatoriaSummary = Convocatoria;

/// Record shown in the detail modal (superset of the summary fields)
pub type ConvocatoriaDetail = Convocatoria;

impl Convocatoria {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// BDNS code, else the call identifier, else the generic id
    pub fn id(&self) -> Option<String> {
        find_present(&self.0, ID_FIELDS)
    }

    /// BDNS code only (shown as a label when present)
    pub fn bdns(&self) -> Option<String> {
        find_present(&self.0, &["BDNS"])
    }

    pub fn title(&self) -> Option<String> {
        find_present(&self.0, TITLE_FIELDS)
    }

    pub fn title_or(&self, default: &str) -> String {
        first_present(&self.0, TITLE_FIELDS, default)
    }

    pub fn organism(&self) -> String {
        first_present(&self.0, ORGANISM_FIELDS, NOT_SPECIFIED)
    }

    pub fn admin_type(&self) -> Option<AdminType> {
        find_present(&self.0, &["tipoAdministracion"]).map(|code| AdminType::from_code(&code))
    }

    /// Display date for result lists
    pub fn summary_date(&self) -> String {
        format_fecha(find_present(&self.0, SUMMARY_DATE_FIELDS).as_deref())
    }

    /// Publication date for the detail view
    pub fn published_date(&self) -> String {
        format_fecha(find_present(&self.0, DETAIL_DATE_FIELDS).as_deref())
    }

    pub fn deadline_start(&self) -> Option<String> {
        find_present(&self.0, DEADLINE_START_FIELDS).map(|d| format_fecha(Some(&d)))
    }

    pub fn deadline_end(&self) -> Option<String> {
        find_present(&self.0, DEADLINE_END_FIELDS).map(|d| format_fecha(Some(&d)))
    }

    pub fn description(&self) -> Option<String> {
        find_present(&self.0, DESCRIPTION_FIELDS)
    }

    pub fn beneficiaries(&self) -> Option<String> {
        find_present(&self.0, BENEFICIARIES_FIELDS)
    }

    /// May contain markup in some API versions
    pub fn amount(&self) -> Option<String> {
        find_present(&self.0, AMOUNT_FIELDS)
    }

    pub fn external_url(&self) -> Option<String> {
        find_present(&self.0, URL_FIELDS)
    }
}

impl From<Map<String, Value>> for Convocatoria {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Administration level issuing the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminType {
    State,
    Regional,
    Local,
    Other,
    Unknown(String),
}

impl AdminType {
    /// Options offered by the search form
    pub const KNOWN: [AdminType; 4] = [
        AdminType::State,
        AdminType::Regional,
        AdminType::Local,
        AdminType::Other,
    ];

    pub fn code(&self) -> &str {
        match self {
            AdminType::State => "C",
            AdminType::Regional => "A",
            AdminType::Local => "L",
            AdminType::Other => "O",
            AdminType::Unknown(code) => code,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "C" => AdminType::State,
            "A" => AdminType::Regional,
            "L" => AdminType::Local,
            "O" => AdminType::Other,
            _ => AdminType::Unknown(code.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AdminType::State => "Estado",
            AdminType::Regional => "Autonómica",
            AdminType::Local => "Local",
            AdminType::Other => "Otros",
            AdminType::Unknown(code) => code,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            AdminType::State => "c-badge--state",
            AdminType::Regional => "c-badge--regional",
            AdminType::Local => "c-badge--local",
            AdminType::Other => "c-badge--other",
            AdminType::Unknown(_) => "c-badge--unknown",
        }
    }
}
