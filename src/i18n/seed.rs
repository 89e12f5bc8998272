//! Bundled seed translations.
//!
//! Common UI copy ships pre-translated so the first render of these strings
//! never hits the translation provider. Entries are raw, unescaped text keyed
//! by the English source string.

/// One source string and its bundled translations by locale code.
pub type SeedEntry = (&'static str, &'static [(&'static str, &'static str)]);

/// Seed translations loaded into every new cache.
pub static SEED_TRANSLATIONS: &[SeedEntry] = &[
    (
        "Book Now",
        &[
            ("es", "Reservar ahora"),
            ("de", "Jetzt buchen"),
            ("it", "Prenota ora"),
            ("pt", "Reserve agora"),
            ("ar", "احجز الآن"),
            ("he", "הזמינו עכשיו"),
        ],
    ),
    (
        "Discover Trips",
        &[
            ("es", "Descubre viajes"),
            ("fr", "Découvrir les voyages"),
            ("de", "Reisen entdecken"),
            ("it", "Scopri i viaggi"),
            ("pt", "Descubra viagens"),
            ("ar", "اكتشف الرحلات"),
        ],
    ),
    (
        "Sign In",
        &[
            ("es", "Iniciar sesión"),
            ("fr", "Se connecter"),
            ("de", "Anmelden"),
            ("it", "Accedi"),
            ("pt", "Entrar"),
            ("ar", "تسجيل الدخول"),
            ("he", "התחברות"),
        ],
    ),
    (
        "Experiences",
        &[
            ("es", "Experiencias"),
            ("fr", "Expériences"),
            ("de", "Erlebnisse"),
            ("it", "Esperienze"),
            ("pt", "Experiências"),
            ("ar", "التجارب"),
        ],
    ),
    (
        "Contact Us",
        &[
            ("es", "Contáctanos"),
            ("fr", "Contactez-nous"),
            ("de", "Kontakt"),
            ("it", "Contattaci"),
            ("pt", "Fale conosco"),
            ("ar", "اتصل بنا"),
        ],
    ),
    (
        "Language",
        &[
            ("es", "Idioma"),
            ("fr", "Langue"),
            ("de", "Sprache"),
            ("it", "Lingua"),
            ("pt", "Idioma"),
            ("ar", "اللغة"),
            ("he", "שפה"),
        ],
    ),
];
