//! Interview card components generated from JSON data.
//!
//! Each locale may ship a `interview_cards.json` file next to its
//! components. The entries are rendered into card-deck markup and a
//! navigation list, which the builder registers as the synthetic
//! `interview_cards` and `interview_navigation` components. One render path
//! serves both locales; only the input data differs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One interview entry as stored in `interview_cards.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterviewCard {
    pub name: String,
    pub image: String,
    pub title: String,
    pub short_info: String,
    pub long_info: String,
    pub photos_folder_path: String,
}

/// A photo discovered in a card's gallery folder.
#[derive(Debug, Clone, PartialEq)]
struct Photo {
    name: String,
    source: String,
}

/// Errors that can occur while loading card data.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Failed to read card data {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid card data {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the card entries for one locale.
pub fn load_cards(path: &Path) -> Result<Vec<InterviewCard>, CardError> {
    let data = fs::read_to_string(path).map_err(|e| CardError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&data).map_err(|e| CardError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Cards per `card-deck` wrapper.
const DECK_SIZE: usize = 3;

/// Render the card-deck markup for a set of cards.
///
/// Gallery photos are discovered under `source_dir` at each card's
/// `PhotosFolderPath`. A card with a missing or empty photo folder renders
/// with an empty gallery and logs a warning.
pub fn render_card_deck(cards: &[InterviewCard], source_dir: &Path) -> String {
    let mut markup = String::new();

    for deck in cards.chunks(DECK_SIZE) {
        markup.push_str("\n\t<div class=\"card-deck interview\">");
        for card in deck {
            markup.push_str(&render_card(card, source_dir));
        }
        markup.push_str("\n\t</div>");
    }

    markup
}

/// Render the navigation list entries derived from the card names.
pub fn render_card_navigation(cards: &[InterviewCard]) -> String {
    let mut markup = String::new();

    for card in cards {
        markup.push_str(&format!(
            "<li id=\"{}_menu\" class=\"nav-elem\"><div>{}</div></li>\n",
            anchor_id(&card.name),
            card.name
        ));
    }

    markup
}

fn render_card(card: &InterviewCard, source_dir: &Path) -> String {
    let photos = gallery_photos(card, source_dir);

    let gallery: String = photos
        .iter()
        .map(|photo| {
            format!(
                "<li class=\"card-photo\">\n\t\t\t\t\t\t<img src=\"{{fill_parents}}{}\" alt=\"{}\">\n\t\t\t\t\t</li>",
                photo.source, photo.name
            )
        })
        .collect();

    format!(
        r#"
		<div id="{id}" class="card interview">
			<img class="card-img-top" src="{{fill_parents}}{image}" alt="Photo">
			<h4 class="card-title">{title}</h4>
			<div class="card-body">
				<h5 class="card-subtitle">{name}</h5>
				<div class="card-text">
					<p class="card-text">{short}</p>
					<p class="card-text card-long-desc no-display">{long}</p>
				</div>
				<h2 class="no-display">Gallery</h2>
				<ul class="card-images no-display">
					{gallery}
				</ul>
			</div>
		</div>"#,
        id = anchor_id(&card.name),
        image = card.image,
        title = card.title,
        name = card.name,
        short = card.short_info,
        long = card.long_info,
        gallery = gallery,
    )
}

/// Scan a card's photo folder for gallery images.
fn gallery_photos(card: &InterviewCard, source_dir: &Path) -> Vec<Photo> {
    let folder = source_dir.join(&card.photos_folder_path);

    let entries = match fs::read_dir(&folder) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                "Missing photos folder for the {} interview card: {}",
                card.name,
                e
            );
            return Vec::new();
        }
    };

    let mut photos = Vec::new();
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();

    for file in names {
        let ext = file.rsplit('.').next().unwrap_or("");
        if matches!(ext, "jpg" | "png" | "svg") {
            let name = file.split('.').next().unwrap_or(&file).to_string();
            photos.push(Photo {
                name,
                source: format!("{}{}", card.photos_folder_path, file),
            });
        }
    }

    if photos.is_empty() {
        tracing::warn!("No photos found for the {} interview card", card.name);
    }

    photos
}

/// HTML anchor id for a card: the name with its first space underscored.
fn anchor_id(name: &str) -> String {
    name.replacen(' ', "_", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn card(name: &str, photos_folder: &str) -> InterviewCard {
        InterviewCard {
            name: name.to_string(),
            image: "images/portrait.jpg".to_string(),
            title: "A title".to_string(),
            short_info: "short".to_string(),
            long_info: "long".to_string(),
            photos_folder_path: photos_folder.to_string(),
        }
    }

    #[test]
    fn loads_pascal_case_card_data() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("interview_cards.json");
        fs::write(
            &path,
            r#"[{
                "Name": "Jane Doe",
                "Image": "images/jane.jpg",
                "Title": "On teaching",
                "ShortInfo": "short",
                "LongInfo": "long",
                "PhotosFolderPath": "images/jane/"
            }]"#,
        )
        .unwrap();

        let cards = load_cards(&path).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Jane Doe");
        assert_eq!(cards[0].photos_folder_path, "images/jane/");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("interview_cards.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_cards(&path), Err(CardError::Json { .. })));
    }

    #[test]
    fn decks_group_three_cards_each() {
        let temp = tempdir().unwrap();
        let cards: Vec<_> = (0..4).map(|i| card(&format!("P {i}"), "none/")).collect();

        let markup = render_card_deck(&cards, temp.path());

        assert_eq!(markup.matches("card-deck interview").count(), 2);
        assert_eq!(markup.matches("card interview").count(), 4);
    }

    #[test]
    fn gallery_lists_supported_image_types_only() {
        let temp = tempdir().unwrap();
        let photos = temp.path().join("images").join("jane");
        fs::create_dir_all(&photos).unwrap();
        fs::write(photos.join("a.jpg"), "").unwrap();
        fs::write(photos.join("b.svg"), "").unwrap();
        fs::write(photos.join("notes.txt"), "").unwrap();

        let markup = render_card_deck(&[card("Jane Doe", "images/jane/")], temp.path());

        assert!(markup.contains("{fill_parents}images/jane/a.jpg"));
        assert!(markup.contains("{fill_parents}images/jane/b.svg"));
        assert!(!markup.contains("notes.txt"));
    }

    #[test]
    fn card_ids_underscore_the_first_space() {
        let temp = tempdir().unwrap();

        let markup = render_card_deck(&[card("Jane Mary Doe", "none/")], temp.path());

        assert!(markup.contains("id=\"Jane_Mary Doe\""));
    }

    #[test]
    fn navigation_lists_every_card() {
        let nav = render_card_navigation(&[card("Jane Doe", "x/"), card("John Roe", "y/")]);

        assert!(nav.contains("id=\"Jane_Doe_menu\""));
        assert!(nav.contains("id=\"John_Roe_menu\""));
        assert_eq!(nav.matches("nav-elem").count(), 2);
    }
}
