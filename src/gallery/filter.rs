use crate::gallery::favorites::FavoriteSet;
use crate::models::images::Image;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Filter<'a> {
    /// Matched case-insensitively against author and title. Empty matches everything.
    pub search: &'a str,
    /// Album key to restrict to. Empty matches everything.
    pub album: &'a str,
    pub favorites_only: bool,
}

impl<'a> Filter<'a> {
    pub fn matches(&self, image: &Image, favorites: &FavoriteSet) -> bool {
        self.matches_text(image)
            && self.matches_album(image)
            && self.matches_favorites(image, favorites)
    }

    fn matches_text(&self, image: &Image) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        image.author.to_lowercase().contains(&needle)
            || image
                .title
                .as_ref()
                .map_or(false, |title| title.to_lowercase().contains(&needle))
    }

    fn matches_album(&self, image: &Image) -> bool {
        self.album.is_empty() || image.album().as_deref() == Some(self.album)
    }

    fn matches_favorites(&self, image: &Image, favorites: &FavoriteSet) -> bool {
        !self.favorites_only || favorites.contains(&image.id)
    }
}

/// Images passing `filter`, in source order.
pub fn filter_images<'i>(
    images: &'i [Image],
    filter: &Filter<'_>,
    favorites: &FavoriteSet,
) -> Vec<&'i Image> {
    images
        .iter()
        .filter(|image| filter.matches(image, favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::images::{image, ImageId};

    fn ids(images: &[&Image]) -> Vec<String> {
        images.iter().map(|i| i.id.to_string()).collect()
    }

    fn sample() -> Vec<Image> {
        vec![
            image("1", "Alice", None),
            image("2", "Bob", Some("Sunset over Malibu")),
            image("3", "Carol", Some("Alleyway")),
            image("7", "alina", None),
            image("12", "Dave", None),
        ]
    }

    #[test]
    fn search_matches_author_case_insensitively() {
        let images = vec![image("1", "Alice", None), image("2", "Bob", None)];
        let filter = Filter {
            search: "ali",
            ..Default::default()
        };

        let filtered = filter_images(&images, &filter, &FavoriteSet::new());
        assert_eq!(ids(&filtered), vec!["1"]);
    }

    #[test]
    fn search_matches_title_when_present() {
        let images = sample();
        let filter = Filter {
            search: "MALIBU",
            ..Default::default()
        };

        let filtered = filter_images(&images, &filter, &FavoriteSet::new());
        assert_eq!(ids(&filtered), vec!["2"]);
    }

    #[test]
    fn every_result_contains_the_search_text() {
        let images = sample();
        for search in ["al", "A", "o", "LL", "zzz", ""].iter().copied() {
            let filter = Filter {
                search,
                ..Default::default()
            };
            let needle = search.to_lowercase();
            for image in filter_images(&images, &filter, &FavoriteSet::new()) {
                let title = image.title.clone().unwrap_or_default().to_lowercase();
                assert!(image.author.to_lowercase().contains(&needle) || title.contains(&needle));
            }
        }
    }

    #[test]
    fn empty_filter_keeps_source_order() {
        let images = sample();
        let filtered = filter_images(&images, &Filter::default(), &FavoriteSet::new());
        assert_eq!(ids(&filtered), vec!["1", "2", "3", "7", "12"]);
    }

    #[test]
    fn album_selects_ids_by_modulo() {
        let images = sample();
        let filter = Filter {
            album: "2",
            ..Default::default()
        };

        let filtered = filter_images(&images, &filter, &FavoriteSet::new());
        assert_eq!(ids(&filtered), vec!["2", "7", "12"]);
    }

    #[test]
    fn favorites_only_restricts_to_favorites() {
        let images = vec![
            image("1", "Alice", None),
            image("2", "Bob", None),
            image("3", "Carol", None),
        ];
        let favorites: FavoriteSet = vec![ImageId::from("3")].into_iter().collect();
        let filter = Filter {
            favorites_only: true,
            ..Default::default()
        };

        let filtered = filter_images(&images, &filter, &favorites);
        assert_eq!(ids(&filtered), vec!["3"]);
    }

    #[test]
    fn conditions_are_combined() {
        let images = sample();
        let favorites: FavoriteSet = vec![ImageId::from("7"), ImageId::from("1")].into_iter().collect();
        let filter = Filter {
            search: "ali",
            album: "2",
            favorites_only: true,
        };

        let filtered = filter_images(&images, &filter, &favorites);
        assert_eq!(ids(&filtered), vec!["7"]);
    }

    #[test]
    fn favorites_not_in_the_list_never_appear() {
        let images = sample();
        let favorites: FavoriteSet = vec![ImageId::from("99")].into_iter().collect();
        let filter = Filter {
            favorites_only: true,
            ..Default::default()
        };

        assert!(filter_images(&images, &filter, &favorites).is_empty());
    }
}
