//! Output record shapes.
//!
//! Field order in these structs is the field order of the published JSON.

use roster_core::{ActivityCell, Category, RecencyWindow, RosterRow};
use serde::Serialize;

/// Handles, activity and email: the trailing fields of every category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialCore<'a> {
    pub twitter: Option<&'a str>,
    pub twitter_activo: ActivityCell,
    pub bluesky: Option<&'a str>,
    pub bluesky_activo: ActivityCell,
    pub mastodon: Option<&'a str>,
    pub mastodon_activo: ActivityCell,
    pub email: Option<&'a str>,
}

impl<'a> From<&'a RosterRow> for SocialCore<'a> {
    fn from(row: &'a RosterRow) -> Self {
        Self {
            twitter: row.twitter.handle.as_deref(),
            twitter_activo: row.twitter.activity,
            bluesky: row.bluesky.handle.as_deref(),
            bluesky_activo: row.bluesky.activity,
            mastodon: row.mastodon.handle.as_deref(),
            mastodon_activo: row.mastodon.activity,
            email: row.email.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeRecord<'a> {
    pub nombre: Option<&'a str>,
    pub categoria: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutonomiaRecord<'a> {
    pub tipo: Option<&'a str>,
    pub ccaa: Option<&'a str>,
    pub nombre: Option<&'a str>,
    pub partido: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GobiernoRecord<'a> {
    pub nombre: Option<&'a str>,
    pub cargo: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CongresoRecord<'a> {
    pub tipo: Option<&'a str>,
    pub nombre: Option<&'a str>,
    pub grupo: Option<&'a str>,
    pub circunscripcion: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenadoRecord<'a> {
    pub tipo: Option<&'a str>,
    pub nombre: Option<&'a str>,
    pub grupo: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartidoRecord<'a> {
    pub nombre: Option<&'a str>,
    /// Always `"Nacional"`; the roster has no column for it.
    pub ambito: &'static str,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversidadRecord<'a> {
    pub nombre: Option<&'a str>,
    pub tipo: Option<&'a str>,
    #[serde(flatten)]
    pub social: SocialCore<'a>,
}

pub const NATIONAL_SCOPE: &str = "Nacional";

/// One record of a per-category file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryRecord<'a> {
    Age(AgeRecord<'a>),
    Autonomia(AutonomiaRecord<'a>),
    Gobierno(GobiernoRecord<'a>),
    Congreso(CongresoRecord<'a>),
    Senado(SenadoRecord<'a>),
    Partido(PartidoRecord<'a>),
    Universidad(UniversidadRecord<'a>),
}

impl<'a> CategoryRecord<'a> {
    /// Project `row` into the schema of `category`.
    #[must_use]
    pub fn from_row(category: Category, row: &'a RosterRow) -> Self {
        let nombre = row.name.as_deref();
        let social = SocialCore::from(row);
        match category {
            Category::Age => Self::Age(AgeRecord {
                nombre,
                categoria: row.detail.as_deref(),
                social,
            }),
            Category::Autonomias => Self::Autonomia(AutonomiaRecord {
                tipo: row.kind.as_deref(),
                ccaa: row.region.as_deref(),
                nombre,
                partido: row.party.as_deref(),
                social,
            }),
            Category::Gobierno => Self::Gobierno(GobiernoRecord {
                nombre,
                cargo: row.detail.as_deref(),
                social,
            }),
            Category::Congreso => Self::Congreso(CongresoRecord {
                tipo: row.kind.as_deref(),
                nombre,
                grupo: row.group.as_deref(),
                circunscripcion: row.district.as_deref(),
                social,
            }),
            Category::Senado => Self::Senado(SenadoRecord {
                tipo: row.kind.as_deref(),
                nombre,
                grupo: row.group.as_deref(),
                social,
            }),
            Category::Partidos => Self::Partido(PartidoRecord {
                nombre,
                ambito: NATIONAL_SCOPE,
                social,
            }),
            Category::Universidades => Self::Universidad(UniversidadRecord {
                nombre,
                tipo: row.kind.as_deref().or(row.detail.as_deref()),
                social,
            }),
        }
    }
}

/// One record of the aggregate file. Activity is reduced to "recently active".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalRecord<'a> {
    pub categoria: &'static str,
    pub subcategoria: Option<&'a str>,
    pub nombre: Option<&'a str>,
    pub twitter: Option<&'a str>,
    pub twitter_activo: bool,
    pub bluesky: Option<&'a str>,
    pub bluesky_activo: bool,
    pub mastodon: Option<&'a str>,
    pub mastodon_activo: bool,
}

impl<'a> TotalRecord<'a> {
    #[must_use]
    pub fn from_row(category: Category, row: &'a RosterRow, window: RecencyWindow) -> Self {
        Self {
            categoria: category.label(),
            subcategoria: row.detail.as_deref().or(row.kind.as_deref()),
            nombre: row.name.as_deref(),
            twitter: row.twitter.handle.as_deref(),
            twitter_activo: window.is_recent(row.twitter.activity),
            bluesky: row.bluesky.handle.as_deref(),
            bluesky_activo: window.is_recent(row.bluesky.activity),
            mastodon: row.mastodon.handle.as_deref(),
            mastodon_activo: window.is_recent(row.mastodon.activity),
        }
    }
}
