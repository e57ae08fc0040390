use crate::error::AppError;
use crate::models::profile_types::{BodyShape, Gender, ProfileUpdate, SkinTone, UserProfile};
use crate::services::profile_service::ProfileStore;
use clap::{Args, Subcommand};

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the current profile
    Show {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one or more profile fields
    Set(ProfileSetArgs),
    /// Mark onboarding as complete
    Onboard,
    /// Set the full-body photo used for try-on images
    Photo {
        /// Photo path or URI
        #[arg(required_unless_present = "clear")]
        uri: Option<String>,
        /// Remove the stored photo
        #[arg(long, conflicts_with = "uri")]
        clear: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileSetArgs {
    /// male, female or other
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub age: Option<u32>,
    /// Height in cm
    #[arg(long)]
    pub height: Option<u32>,
    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f32>,
    /// hourglass, pear, apple, rectangle, inverted_triangle or athletic
    #[arg(long)]
    pub body_shape: Option<BodyShape>,
    /// fair, medium, tan or dark
    #[arg(long)]
    pub skin_tone: Option<SkinTone>,
}

impl From<&ProfileSetArgs> for ProfileUpdate {
    fn from(args: &ProfileSetArgs) -> Self {
        Self {
            gender: args.gender,
            age: args.age,
            height: args.height,
            weight: args.weight,
            body_shape: args.body_shape,
            skin_tone: args.skin_tone,
        }
    }
}

pub fn run(args: &ProfileArgs, store: &ProfileStore) -> Result<(), AppError> {
    match &args.command {
        ProfileCommand::Show { json } => {
            let profile = store.profile()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
            Ok(())
        }
        ProfileCommand::Set(set) => {
            let profile = set_fields(store, set)?;
            print_profile(&profile);
            Ok(())
        }
        ProfileCommand::Onboard => {
            store.complete_onboarding()?;
            println!("Onboarding complete");
            Ok(())
        }
        ProfileCommand::Photo { uri, clear } => {
            let uri = if *clear { None } else { uri.clone() };
            let profile = store.set_full_body_photo(uri)?;
            match &profile.full_body_photo_uri {
                Some(uri) => println!("Full-body photo set to {}", uri),
                None => println!("Full-body photo removed"),
            }
            Ok(())
        }
    }
}

pub fn set_fields(store: &ProfileStore, args: &ProfileSetArgs) -> Result<UserProfile, AppError> {
    let update = ProfileUpdate::from(args);
    if update.is_empty() {
        return Err("Nothing to update. Pass at least one of --gender, --age, --height, --weight, --body-shape, --skin-tone".into());
    }
    if update.age == Some(0) || update.height == Some(0) || update.weight.is_some_and(|w| w <= 0.0) {
        return Err("Age, height and weight must be positive".into());
    }
    store.update_profile(&update)
}

fn print_profile(profile: &UserProfile) {
    println!("gender:     {}", profile.gender);
    println!("age:        {}", profile.age);
    println!("height:     {} cm", profile.height);
    println!("weight:     {} kg", profile.weight);
    println!("body shape: {}", profile.body_shape);
    println!("skin tone:  {}", profile.skin_tone);
    println!("onboarded:  {}", if profile.is_onboarded { "yes" } else { "no" });
    if let Some(uri) = &profile.full_body_photo_uri {
        println!("photo:      {}", uri);
    }
}
