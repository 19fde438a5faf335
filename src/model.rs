//! Entity snapshots exchanged with the library API.
//!
//! Field names on the wire are the backend's (Spanish) identifiers; the structs
//! keep English names via serde renames. Date fields arrive as ISO-like strings,
//! sometimes with a time component, and are normalized to `YYYY-MM-DD` on read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::controller::Resource;

/// Serde adapter for optional wire dates: accepts `null`, empty strings and
/// `YYYY-MM-DD[Thh:mm:ss...]`, keeps only the date portion, and writes dates
/// back as plain `YYYY-MM-DD`.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => {
                // Keep the leading date portion of e.g. "2024-05-01T00:00:00".
                let head = s.get(..10).unwrap_or(s.as_str());
                NaiveDate::parse_from_str(head, FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "idAutor")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "fechaNacimiento", default, with = "wire_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
}

/// One physical copy of a book on a shelf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookCopy {
    #[serde(rename = "idEjemplar")]
    pub id: i64,
    #[serde(rename = "idLibro")]
    pub book_id: Option<i64>,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "idPrestamo")]
    pub id: i64,
    #[serde(rename = "idLector")]
    pub reader_id: i64,
    #[serde(rename = "idBibliotecario")]
    pub librarian_id: i64,
    #[serde(rename = "idEjemplar")]
    pub copy_id: i64,
    #[serde(rename = "fechaPrestamo", default, with = "wire_date")]
    pub loan_date: Option<NaiveDate>,
    #[serde(rename = "fechaDevolucion", default, with = "wire_date")]
    pub return_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reader {
    #[serde(rename = "idLector")]
    pub id: i64,
    #[serde(rename = "idPersona")]
    pub person_id: i64,
    #[serde(rename = "fechaRegistro", default, with = "wire_date")]
    pub registered_on: Option<NaiveDate>,
    #[serde(rename = "ocupacion")]
    pub occupation: String,
}

impl Resource for Author {
    const NAME: &'static str = "author";
    const TITLE: &'static str = "Authors";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for BookCopy {
    const NAME: &'static str = "copy";
    const TITLE: &'static str = "Copies";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Loan {
    const NAME: &'static str = "loan";
    const TITLE: &'static str = "Loans";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Reader {
    const NAME: &'static str = "reader";
    const TITLE: &'static str = "Readers";
    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update payload for an author; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorDraft {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "fechaNacimiento", with = "wire_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CopyDraft {
    #[serde(rename = "idLibro")]
    pub book_id: i64,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanDraft {
    #[serde(rename = "idLector")]
    pub reader_id: i64,
    #[serde(rename = "idBibliotecario")]
    pub librarian_id: i64,
    #[serde(rename = "idEjemplar")]
    pub copy_id: i64,
    #[serde(rename = "fechaPrestamo", with = "wire_date")]
    pub loan_date: Option<NaiveDate>,
    #[serde(rename = "fechaDevolucion", with = "wire_date")]
    pub return_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReaderDraft {
    #[serde(rename = "idPersona")]
    pub person_id: i64,
    #[serde(rename = "fechaRegistro", with = "wire_date")]
    pub registered_on: Option<NaiveDate>,
    #[serde(rename = "ocupacion")]
    pub occupation: String,
}

/// A validated form payload, tagged by entity so the dispatcher can route it
/// to the right endpoint.
#[derive(Clone, Debug, PartialEq)]
pub enum Draft {
    Author(AuthorDraft),
    Copy(CopyDraft),
    Loan(LoanDraft),
    Reader(ReaderDraft),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn author_from_wire_json_normalizes_datetime() {
        let json = r#"{
            "idAutor": 7,
            "nombre": "Gabriel",
            "apellido": "Mistral",
            "fechaNacimiento": "1889-04-07T00:00:00",
            "nacionalidad": "Chilena"
        }"#;
        let author: Author = serde_json::from_str(json).unwrap();
        assert_eq!(author.id, 7);
        assert_eq!(author.birth_date, Some(date(1889, 4, 7)));
    }

    #[test]
    fn absent_null_and_empty_dates_are_none() {
        let missing: Reader =
            serde_json::from_str(r#"{"idLector":1,"idPersona":2,"ocupacion":"x"}"#).unwrap();
        assert_eq!(missing.registered_on, None);

        let null: Reader = serde_json::from_str(
            r#"{"idLector":1,"idPersona":2,"fechaRegistro":null,"ocupacion":"x"}"#,
        )
        .unwrap();
        assert_eq!(null.registered_on, None);

        let empty: Reader = serde_json::from_str(
            r#"{"idLector":1,"idPersona":2,"fechaRegistro":"","ocupacion":"x"}"#,
        )
        .unwrap();
        assert_eq!(empty.registered_on, None);
    }

    #[test]
    fn draft_serializes_wire_names_and_plain_dates() {
        let draft = LoanDraft {
            reader_id: 1,
            librarian_id: 2,
            copy_id: 3,
            loan_date: Some(date(2024, 5, 1)),
            return_date: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["idLector"], 1);
        assert_eq!(value["fechaPrestamo"], "2024-05-01");
        assert!(value["fechaDevolucion"].is_null());
    }

    #[test]
    fn copy_with_null_book_id_deserializes() {
        let copy: BookCopy =
            serde_json::from_str(r#"{"idEjemplar":4,"idLibro":null,"ubicacion":"A-3"}"#).unwrap();
        assert_eq!(copy.book_id, None);
        assert_eq!(copy.location, "A-3");
    }
}
