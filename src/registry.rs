use crate::error::{PrioritizerError, Result};
use crate::types::scoring::{default_parameters, PreferredDirection, ScoreLevel, ScoreParameter};
use uuid::Uuid;

pub const DEFAULT_NEW_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct NewParameter {
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub default_value: ScoreLevel,
    pub preferred_direction: PreferredDirection,
}

impl Default for NewParameter {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            weight: DEFAULT_NEW_WEIGHT,
            default_value: ScoreLevel::MID,
            preferred_direction: PreferredDirection::High,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParameterEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub default_value: Option<ScoreLevel>,
    pub preferred_direction: Option<PreferredDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
}

/// Ordered scoring parameters. Order is display-only; it never affects scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRegistry {
    parameters: Vec<ScoreParameter>,
}

impl Default for ParameterRegistry {
    fn default() -> Self {
        Self {
            parameters: default_parameters(),
        }
    }
}

impl ParameterRegistry {
    /// Fails when `parameters` is empty or malformed.
    pub fn from_parameters(parameters: Vec<ScoreParameter>) -> Result<Self> {
        if parameters.is_empty() {
            return Err(PrioritizerError::ConfigInvalid(
                "at least one scoring parameter is required".to_string(),
            ));
        }
        for parameter in &parameters {
            validate_name(&parameter.name)?;
            validate_weight(&parameter.id, parameter.weight)?;
        }
        Ok(Self { parameters })
    }

    pub fn as_slice(&self) -> &[ScoreParameter] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn get(&self, id: &str) -> Option<&ScoreParameter> {
        self.parameters.iter().find(|parameter| parameter.id == id)
    }

    pub fn add(&mut self, new: NewParameter) -> Result<&ScoreParameter> {
        validate_name(&new.name)?;
        let id = Uuid::new_v4().to_string();
        validate_weight(&id, new.weight)?;

        self.parameters.push(ScoreParameter {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            weight: new.weight,
            default_value: Some(new.default_value),
            preferred_direction: new.preferred_direction,
        });
        let index = self.parameters.len() - 1;
        Ok(&self.parameters[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<ScoreParameter> {
        let index = self.index_of(id)?;
        if self.parameters.len() <= 1 {
            return Err(PrioritizerError::LastParameter(id.to_string()));
        }
        Ok(self.parameters.remove(index))
    }

    /// Swaps with the adjacent parameter. Returns false at the boundary.
    pub fn shift(&mut self, id: &str, direction: Move) -> Result<bool> {
        let index = self.index_of(id)?;
        let target = match direction {
            Move::Up if index > 0 => index - 1,
            Move::Down if index + 1 < self.parameters.len() => index + 1,
            _ => return Ok(false),
        };
        self.parameters.swap(index, target);
        Ok(true)
    }

    pub fn edit(&mut self, id: &str, edit: ParameterEdit) -> Result<&ScoreParameter> {
        let index = self.index_of(id)?;
        if let Some(name) = &edit.name {
            validate_name(name)?;
        }
        if let Some(weight) = edit.weight {
            validate_weight(id, weight)?;
        }

        let parameter = &mut self.parameters[index];
        if let Some(name) = edit.name {
            parameter.name = name.trim().to_string();
        }
        if let Some(description) = edit.description {
            parameter.description = description;
        }
        if let Some(weight) = edit.weight {
            parameter.weight = weight;
        }
        if let Some(default_value) = edit.default_value {
            parameter.default_value = Some(default_value);
        }
        if let Some(direction) = edit.preferred_direction {
            parameter.preferred_direction = direction;
        }
        Ok(&self.parameters[index])
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.parameters
            .iter()
            .position(|parameter| parameter.id == id)
            .ok_or_else(|| PrioritizerError::ParameterNotFound(id.to_string()))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PrioritizerError::EmptyParameterName);
    }
    Ok(())
}

fn validate_weight(id: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(PrioritizerError::InvalidWeight(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> ParameterRegistry {
        ParameterRegistry::from_parameters(vec![ScoreParameter::new("only", "Only", "", 1.0)])
            .expect("single parameter registry should build")
    }

    #[test]
    fn add_rejects_blank_name_without_change() {
        let mut registry = single();
        let result = registry.add(NewParameter {
            name: "   ".to_string(),
            ..NewParameter::default()
        });
        assert!(matches!(result, Err(PrioritizerError::EmptyParameterName)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_appends_with_fresh_id() {
        let mut registry = single();
        let first = registry
            .add(NewParameter {
                name: "Reach".to_string(),
                ..NewParameter::default()
            })
            .expect("add should succeed")
            .id
            .clone();
        let second = registry
            .add(NewParameter {
                name: "Reach".to_string(),
                ..NewParameter::default()
            })
            .expect("add should succeed")
            .id
            .clone();

        assert_ne!(first, second);
        assert_eq!(registry.as_slice()[1].id, first);
        assert_eq!(registry.as_slice()[2].weight, DEFAULT_NEW_WEIGHT);
    }

    #[test]
    fn add_rejects_non_positive_weight() {
        let mut registry = single();
        let result = registry.add(NewParameter {
            name: "Cost".to_string(),
            weight: 0.0,
            ..NewParameter::default()
        });
        assert!(matches!(result, Err(PrioritizerError::InvalidWeight(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removing_last_parameter_is_rejected() {
        let mut registry = single();
        let result = registry.remove("only");
        assert!(matches!(result, Err(PrioritizerError::LastParameter(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_unknown_parameter_fails() {
        let mut registry = ParameterRegistry::default();
        assert!(matches!(
            registry.remove("nope"),
            Err(PrioritizerError::ParameterNotFound(_))
        ));
    }

    #[test]
    fn shift_swaps_neighbours_and_stops_at_edges() {
        let mut registry = ParameterRegistry::default();
        let first = registry.as_slice()[0].id.clone();
        let second = registry.as_slice()[1].id.clone();

        assert!(!registry.shift(&first, Move::Up).expect("shift should resolve"));
        assert!(registry.shift(&first, Move::Down).expect("shift should resolve"));
        assert_eq!(registry.as_slice()[0].id, second);
        assert_eq!(registry.as_slice()[1].id, first);

        let last = registry.as_slice()[registry.len() - 1].id.clone();
        assert!(!registry.shift(&last, Move::Down).expect("shift should resolve"));
    }

    #[test]
    fn edit_updates_fields_in_place() {
        let mut registry = ParameterRegistry::default();
        let edited = registry
            .edit(
                "impact",
                ParameterEdit {
                    weight: Some(0.3),
                    preferred_direction: Some(PreferredDirection::Neutral),
                    ..ParameterEdit::default()
                },
            )
            .expect("edit should succeed");
        assert_eq!(edited.weight, 0.3);
        assert_eq!(edited.preferred_direction, PreferredDirection::Neutral);
        assert_eq!(registry.as_slice()[0].id, "impact");
    }

    #[test]
    fn edit_with_invalid_weight_changes_nothing() {
        let mut registry = ParameterRegistry::default();
        let before = registry.clone();
        let result = registry.edit(
            "impact",
            ParameterEdit {
                name: Some("Renamed".to_string()),
                weight: Some(-1.0),
                ..ParameterEdit::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(registry, before);
    }
}
