mod patterns;
mod title;

pub use title::{NormalizedTitle, TitleNormalizer, TitleVariant};

#[cfg(test)]
mod test {
    use super::TitleNormalizer;

    #[test]
    fn test_normalize_folds_case_and_diacritics() {
        assert_eq!(
            TitleNormalizer::normalize("Seishun Buta Yarō"),
            TitleNormalizer::normalize("SEISHUN BUTA YARO")
        );
        assert_eq!(
            TitleNormalizer::normalize("Pokémon: Mewtwo Strikes Back!"),
            "pokemon mewtwo strikes back"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "Seishun Buta Yarō wa Bunny Girl Senpai no Yume wo Minai",
            "Attack Season II",
            "Re:ZERO -Starting Life in Another World- Season 2 Part 1",
            "進撃の巨人 The Final Season",
            "  Fate/stay night [Unlimited Blade Works]  ",
            "ℌello Ⅳ",
        ] {
            let once = TitleNormalizer::normalize(raw);
            assert_eq!(TitleNormalizer::normalize(&once), once, "input: {raw}");
        }
    }

    #[test]
    fn test_roman_numerals_become_digits() {
        assert_eq!(TitleNormalizer::normalize("Attack Season II"), "attack season 2");
        assert_eq!(TitleNormalizer::normalize("Rocky IV"), "rocky 4");
        // Only whole words are substituted.
        assert_eq!(TitleNormalizer::normalize("Vivid Strike"), "vivid strike");
    }

    #[test]
    fn test_season_hint() {
        assert_eq!(TitleNormalizer::season_hint("Attack Season II"), Some(2));
        assert_eq!(TitleNormalizer::season_hint("Demo Season 2"), Some(2));
        assert_eq!(TitleNormalizer::season_hint("Kingdom PART3"), Some(3));
        assert_eq!(TitleNormalizer::season_hint("Oshi no Ko cour 1"), Some(1));
        assert_eq!(TitleNormalizer::season_hint("Dr. Stone: Stage 4"), Some(4));
        assert_eq!(TitleNormalizer::season_hint("Cowboy Bebop"), None);
        assert_eq!(TitleNormalizer::season_hint("Counterpart 3"), Some(3));
    }

    #[test]
    fn test_soft_variant_strips_stopwords_and_season() {
        assert_eq!(
            TitleNormalizer::soften("gintama the animation").as_deref(),
            Some("gintama")
        );
        assert_eq!(
            TitleNormalizer::soften("demo season 2").as_deref(),
            Some("demo")
        );
        assert_eq!(
            TitleNormalizer::soften("durarara tv anime").as_deref(),
            Some("durarara")
        );
        assert_eq!(
            TitleNormalizer::soften("attack on titan the final season").as_deref(),
            Some("attack on titan the")
        );
        assert_eq!(
            TitleNormalizer::soften("kingdom second season").as_deref(),
            Some("kingdom")
        );
        assert_eq!(
            TitleNormalizer::soften("demo ova episode 3").as_deref(),
            Some("demo 3")
        );
        // Keywords inside longer words stay.
        assert_eq!(TitleNormalizer::soften("counterpart 3"), None);
        assert_eq!(TitleNormalizer::soften("cowboy bebop"), None);
        assert_eq!(TitleNormalizer::soften("anime"), None);
    }

    #[test]
    fn test_variants_are_ordered_and_unique() {
        let variants = TitleNormalizer::variants("Demo Season 2");
        let queries: Vec<&str> = variants.iter().map(|v| v.query.as_str()).collect();

        assert_eq!(queries, vec!["demo season 2", "demo", "demoseason2"]);
        assert!(variants.iter().all(|v| v.season == Some(2)));

        let variants = TitleNormalizer::variants("Attack on Titan The Final Season");
        let queries: Vec<&str> = variants.iter().map(|v| v.query.as_str()).collect();
        assert_eq!(
            queries,
            vec![
                "attack on titan the final season",
                "attack on titan the",
                "attackontitanthefinalseason",
            ]
        );

        let variants = TitleNormalizer::variants("Re Zero");
        let queries: Vec<&str> = variants.iter().map(|v| v.query.as_str()).collect();
        assert_eq!(queries, vec!["re zero", "rezero"]);

        let variants = TitleNormalizer::variants("Mushishi");
        assert_eq!(variants.len(), 1);

        assert!(TitleNormalizer::variants("!!!").is_empty());
    }

    #[test]
    fn test_long_titles_get_truncated_variant() {
        let analyzed = TitleNormalizer::analyze(
            "Seishun Buta Yarō wa Bunny Girl Senpai no Yume wo Minai",
        );

        assert_eq!(
            analyzed.truncated.as_deref(),
            Some("seishun buta yaro wa bunny girl")
        );
        assert_eq!(analyzed.season, None);
        assert_eq!(analyzed.spaceless.as_deref(), Some("seishunbutayarowabunnygirl"));
    }
}
