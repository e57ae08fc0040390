use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "nam")]
    Male,
    #[serde(alias = "nu")]
    Female,
    #[serde(alias = "khac")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    Hourglass,
    Pear,
    Apple,
    Rectangle,
    InvertedTriangle,
    Athletic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Fair,
    Medium,
    Tan,
    Dark,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl BodyShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Hourglass => "hourglass",
            BodyShape::Pear => "pear",
            BodyShape::Apple => "apple",
            BodyShape::Rectangle => "rectangle",
            BodyShape::InvertedTriangle => "inverted_triangle",
            BodyShape::Athletic => "athletic",
        }
    }
}

impl SkinTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Fair => "fair",
            SkinTone::Medium => "medium",
            SkinTone::Tan => "tan",
            SkinTone::Dark => "dark",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "nam" => Ok(Gender::Male),
            "female" | "nu" => Ok(Gender::Female),
            "other" | "khac" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

impl FromStr for BodyShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hourglass" => Ok(BodyShape::Hourglass),
            "pear" => Ok(BodyShape::Pear),
            "apple" => Ok(BodyShape::Apple),
            "rectangle" => Ok(BodyShape::Rectangle),
            "inverted_triangle" => Ok(BodyShape::InvertedTriangle),
            "athletic" => Ok(BodyShape::Athletic),
            other => Err(format!("unknown body shape: {}", other)),
        }
    }
}

impl FromStr for SkinTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fair" => Ok(SkinTone::Fair),
            "medium" => Ok(SkinTone::Medium),
            "tan" => Ok(SkinTone::Tan),
            "dark" => Ok(SkinTone::Dark),
            other => Err(format!("unknown skin tone: {}", other)),
        }
    }
}

/// Body details used to tailor outfit suggestions. Height is in cm, weight in kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u32,
    pub height: u32,
    pub weight: f32,
    pub body_shape: BodyShape,
    pub skin_tone: SkinTone,
    #[serde(default)]
    pub is_onboarded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_body_photo_uri: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            gender: Gender::Female,
            age: 25,
            height: 160,
            weight: 50.0,
            body_shape: BodyShape::Rectangle,
            skin_tone: SkinTone::Medium,
            is_onboarded: false,
            full_body_photo_uri: None,
        }
    }
}

/// A partial profile edit; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub height: Option<u32>,
    pub weight: Option<f32>,
    pub body_shape: Option<BodyShape>,
    pub skin_tone: Option<SkinTone>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(weight) = self.weight {
            profile.weight = weight;
        }
        if let Some(body_shape) = self.body_shape {
            profile.body_shape = body_shape;
        }
        if let Some(skin_tone) = self.skin_tone {
            profile.skin_tone = skin_tone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_gender_codes_are_accepted() {
        let json = r#"{"gender":"nam","age":30,"height":175,"weight":70,
            "bodyShape":"inverted_triangle","skinTone":"tan","isOnboarded":true}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.body_shape, BodyShape::InvertedTriangle);
        assert!(profile.full_body_photo_uri.is_none());

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["gender"], "male");
        assert_eq!(back["bodyShape"], "inverted_triangle");
    }

    #[test]
    fn parse_from_cli_values() {
        assert_eq!("inverted-triangle".parse::<BodyShape>(), Ok(BodyShape::InvertedTriangle));
        assert_eq!("NU".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("dark".parse::<SkinTone>(), Ok(SkinTone::Dark));
        assert!("olive".parse::<SkinTone>().is_err());
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut profile = UserProfile::default();
        let update = ProfileUpdate {
            age: Some(31),
            skin_tone: Some(SkinTone::Fair),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut profile);

        assert_eq!(profile.age, 31);
        assert_eq!(profile.skin_tone, SkinTone::Fair);
        assert_eq!(profile.height, 160);
        assert_eq!(profile.gender, Gender::Female);
        assert!(ProfileUpdate::default().is_empty());
    }
}
