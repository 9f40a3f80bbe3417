use serde::{Deserialize, Serialize};

use super::NewSimulation;

/// The optional regression inputs. They only exist as a complete triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDrivenInputs {
    /// Property size in square meters, 20 to 120.
    pub surface: f64,
    /// Number of bedrooms, 1 to 4.
    pub bedrooms: u8,
    /// Location score, 5.0 to 10.0.
    pub location_score: f64,
}

impl DataDrivenInputs {
    /// Builds the triple only when every part is present.
    ///
    /// A partially filled triple yields `None`, so the extended calculation
    /// never runs on incomplete data.
    pub fn from_parts(
        surface: Option<f64>,
        bedrooms: Option<u8>,
        location_score: Option<f64>,
    ) -> Option<Self> {
        match (surface, bedrooms, location_score) {
            (Some(surface), Some(bedrooms), Some(location_score)) => Some(Self {
                surface,
                bedrooms,
                location_score,
            }),
            _ => None,
        }
    }
}

/// Validated input to the yield calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub annual_fee: f64,
    pub email: String,
    pub data_driven: Option<DataDrivenInputs>,
}

impl SimulationInput {
    /// The subset of fields that gets persisted.
    pub fn to_new_simulation(&self) -> NewSimulation {
        NewSimulation::new(
            self.purchase_price,
            self.monthly_rent,
            self.annual_fee,
            &self.email,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_parts_requires_all_three() {
        assert_eq!(
            DataDrivenInputs::from_parts(Some(50.0), Some(2), Some(8.0)),
            Some(DataDrivenInputs {
                surface: 50.0,
                bedrooms: 2,
                location_score: 8.0,
            })
        );
    }

    #[test]
    fn from_parts_treats_partial_triple_as_absent() {
        assert_eq!(DataDrivenInputs::from_parts(Some(50.0), Some(2), None), None);
        assert_eq!(DataDrivenInputs::from_parts(None, Some(2), Some(8.0)), None);
        assert_eq!(DataDrivenInputs::from_parts(Some(50.0), None, Some(8.0)), None);
        assert_eq!(DataDrivenInputs::from_parts(None, None, None), None);
    }

    #[test]
    fn to_new_simulation_drops_data_driven_fields() {
        let input = SimulationInput {
            purchase_price: 200000.0,
            monthly_rent: 1200.0,
            annual_fee: 500.0,
            email: " Owner@Example.com ".to_string(),
            data_driven: Some(DataDrivenInputs {
                surface: 50.0,
                bedrooms: 2,
                location_score: 8.0,
            }),
        };

        let new_simulation = input.to_new_simulation();

        assert_eq!(new_simulation.purchase_price, 200000.0);
        assert_eq!(new_simulation.monthly_rent, 1200.0);
        assert_eq!(new_simulation.annual_fee, 500.0);
        assert_eq!(new_simulation.email, "owner@example.com");
    }
}
