//! Person-Event Key: the identity of one clinical visit.

use std::cmp::Ordering;

use crate::columns::{
    EDAD, FECHA_EVENTO, FECHA_NACIMIENTO, MAYOR_18, NOMBRE, SERVICIO_NORM, SEXO,
};

/// Composite key that identifies one visit of one person.
///
/// All prepared rows sharing a key collapse into a single wide row. The
/// derived ordering follows the wide base column order, which is the order
/// used when merging visits across sheets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PersonEventKey {
    pub nombre: String,
    pub sexo: String,
    /// Age in whole years; `None` when the birth date is unknown.
    pub edad: Option<i32>,
    pub mayor_18: String,
    pub fecha_nacimiento: String,
    pub servicio_norm: String,
    pub fecha_evento: String,
}

impl PersonEventKey {
    /// Builds a key by reading each key field through `value_of`.
    ///
    /// `value_of` receives a wide base column name and returns the cell text.
    /// An empty or non-numeric `edad` cell becomes `None`.
    pub fn from_fields<F>(mut value_of: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            nombre: value_of(NOMBRE),
            sexo: value_of(SEXO),
            edad: value_of(EDAD).trim().parse::<i32>().ok(),
            mayor_18: value_of(MAYOR_18),
            fecha_nacimiento: value_of(FECHA_NACIMIENTO),
            servicio_norm: value_of(SERVICIO_NORM),
            fecha_evento: value_of(FECHA_EVENTO),
        }
    }

    /// Key values as text, in wide base column order.
    pub fn values(&self) -> [String; 7] {
        [
            self.nombre.clone(),
            self.sexo.clone(),
            self.edad_text(),
            self.mayor_18.clone(),
            self.fecha_nacimiento.clone(),
            self.servicio_norm.clone(),
            self.fecha_evento.clone(),
        ]
    }

    /// Age as text, empty when unknown.
    pub fn edad_text(&self) -> String {
        self.edad.map(|edad| edad.to_string()).unwrap_or_default()
    }

    /// Ordering used for pivoted sheets: birth date, name, event date, then
    /// the remaining fields so the order is total.
    pub fn cmp_birth_name_event(&self, other: &Self) -> Ordering {
        self.fecha_nacimiento
            .cmp(&other.fecha_nacimiento)
            .then_with(|| self.nombre.cmp(&other.nombre))
            .then_with(|| self.fecha_evento.cmp(&other.fecha_evento))
            .then_with(|| self.cmp(other))
    }
}
