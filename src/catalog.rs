// Tour catalog: the static, read-only list of tours the operator sells.
// The booking flow only needs the id and name of the tour being booked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

/// Ordered, read-only sequence of tour records.
pub trait TourCatalog: Send + Sync {
    fn tours(&self) -> &[Tour];

    fn find(&self, id: u32) -> Option<&Tour> {
        self.tours().iter().find(|tour| tour.id == id)
    }
}

/// The operator's built-in tour list, optionally replaced from JSON at
/// deployment time.
#[derive(Debug, Clone)]
pub struct StaticTourCatalog {
    tours: Vec<Tour>,
}

impl StaticTourCatalog {
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self { tours }
    }

    /// Parses a catalog from a JSON array of tour records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tours: Vec<Tour> = serde_json::from_str(json)?;
        Ok(Self { tours })
    }
}

impl Default for StaticTourCatalog {
    fn default() -> Self {
        Self {
            tours: vec![
                Tour {
                    id: 1,
                    name: "Maasai Mara Safari".to_string(),
                    description: "3-day luxury safari with wildlife viewing".to_string(),
                    price: 1200.0,
                    image: "/images/mara.jpg".to_string(),
                },
                Tour {
                    id: 2,
                    name: "Diani Beach Retreat".to_string(),
                    description: "5-day beach vacation with water sports".to_string(),
                    price: 1950.0,
                    image: "/images/diani_1.jpeg".to_string(),
                },
                Tour {
                    id: 3,
                    name: "Kalasha 2 day meals Tsavo East".to_string(),
                    description: "3-day luxury safari with wildlife viewing".to_string(),
                    price: 1700.0,
                    image: "/images/kalasha.jpg".to_string(),
                },
                Tour {
                    id: 4,
                    name: "Okwonko dinner Tsavo West".to_string(),
                    description: "3-day luxury safari with wildlife viewing".to_string(),
                    price: 1700.0,
                    image: "/images/supper.jpg".to_string(),
                },
            ],
        }
    }
}

impl TourCatalog for StaticTourCatalog {
    fn tours(&self) -> &[Tour] {
        &self.tours
    }
}
