// Copyright 2023 Remi Bernotavicius

//! Converts colloquial kitchen measures into base units (grams or milliliters, used
//! interchangeably). Most measures depend on what is being measured: a cup of flour weighs less
//! than a cup of sugar, and "2 adet" of eggs is a different amount than "2 adet" of potatoes.

use derive_more::Display;
use strum::EnumIter;

/// Ordered `(name fragment, base units)` pairs. The first fragment found in the ingredient name
/// wins, so "kapya biber" weighs as a "biber".
///
/// In the cup and spoon tables the English names come first, since short Turkish fragments like
/// "un" and "su" occur inside English words ("sunflower oil").
pub type WeightTable = &'static [(&'static str, f64)];

/// Average weight of one piece ("adet", "tane").
pub const PIECE_WEIGHTS: WeightTable = &[
    ("biber", 50.0),
    ("kapya", 150.0),
    ("dolmalık", 100.0),
    ("soğan", 150.0),
    ("patates", 200.0),
    ("domates", 120.0),
    ("havuç", 100.0),
    ("sarımsak", 30.0),
    ("kabak", 200.0),
    ("patlıcan", 250.0),
    ("salatalık", 120.0),
    ("marul", 500.0),
    ("elma", 180.0),
    ("limon", 80.0),
    ("portakal", 200.0),
    ("muz", 150.0),
    ("yumurta", 50.0),
    ("ekmek", 250.0),
    ("bell pepper", 150.0),
    ("pepper", 50.0),
    ("onion", 150.0),
    ("potato", 200.0),
    ("tomato", 120.0),
    ("carrot", 100.0),
    ("garlic", 30.0),
    ("zucchini", 200.0),
    ("squash", 200.0),
    ("eggplant", 250.0),
    ("cucumber", 120.0),
    ("lettuce", 500.0),
    ("apple", 180.0),
    ("lemon", 80.0),
    ("orange", 200.0),
    ("banana", 150.0),
    ("egg", 50.0),
    ("bread", 250.0),
];

/// One water glass ("su bardağı").
pub const CUP_WEIGHTS: WeightTable = &[
    ("flour", 110.0),
    ("sugar", 200.0),
    ("oil", 200.0),
    ("milk", 200.0),
    ("water", 200.0),
    ("rice", 180.0),
    ("lentil", 170.0),
    ("un", 110.0),
    ("şeker", 200.0),
    ("yağ", 200.0),
    ("süt", 200.0),
    ("su", 200.0),
    ("pirinç", 180.0),
    ("mercimek", 170.0),
    ("bulgur", 160.0),
];

/// One tablespoon ("yemek kaşığı").
pub const TABLESPOON_WEIGHTS: WeightTable = &[
    ("tomato paste", 25.0),
    ("salt", 18.0),
    ("sugar", 15.0),
    ("flour", 10.0),
    ("oil", 12.0),
    ("cocoa", 8.0),
    ("salça", 25.0),
    ("tuz", 18.0),
    ("şeker", 15.0),
    ("un", 10.0),
    ("yağ", 12.0),
    ("kakao", 8.0),
];

/// One dessert spoon ("tatlı kaşığı").
pub const TEASPOON_WEIGHTS: WeightTable = &[
    ("tomato paste", 15.0),
    ("salt", 12.0),
    ("sugar", 10.0),
    ("flour", 7.0),
    ("oil", 8.0),
    ("cocoa", 5.0),
    ("salça", 15.0),
    ("tuz", 12.0),
    ("şeker", 10.0),
    ("un", 7.0),
    ("yağ", 8.0),
    ("kakao", 5.0),
];

/// One tea spoon ("çay kaşığı").
pub const COFFEE_SPOON_WEIGHTS: WeightTable = &[
    ("salt", 6.0),
    ("sugar", 5.0),
    ("baking", 5.0),
    ("tuz", 6.0),
    ("şeker", 5.0),
    ("kabartma", 5.0),
];

/// One packet ("paket").
pub const PACKET_WEIGHTS: WeightTable = &[
    ("vanilya", 5.0),
    ("kabartma", 10.0),
    ("makarna", 500.0),
    ("krema", 200.0),
    ("margarin", 250.0),
    ("vanilla", 5.0),
    ("baking", 10.0),
    ("pasta", 500.0),
    ("cream", 200.0),
    ("margarine", 250.0),
];

/// The family a unit string belongs to, decided from the unit alone.
#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq)]
pub enum Measure {
    #[display("kg, l, litre")]
    Kilo,
    #[display("gr, ml, gram")]
    Base,
    #[display("adet, tane")]
    Piece,
    #[display("su bardağı, bardak")]
    Cup,
    #[display("yemek kaşığı, yk, kaşık")]
    Tablespoon,
    #[display("tatlı kaşığı, tk")]
    Teaspoon,
    #[display("çay kaşığı, çk")]
    CoffeeSpoon,
    #[display("paket")]
    Packet,
    #[display("demet, bağ")]
    Bunch,
    #[display("anything else")]
    Unknown,
}

impl Measure {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    /// Rules are checked in order and the first match wins.
    pub fn classify(unit: &str) -> Self {
        let unit = unit.trim().to_lowercase();
        let unit = unit.as_str();

        if matches!(unit, "kg" | "l" | "litre") {
            Self::Kilo
        } else if matches!(unit, "gr" | "ml" | "gram") {
            Self::Base
        } else if unit.contains("adet") || unit.contains("tane") {
            Self::Piece
        } else if unit.contains("bardak") || unit.contains("su bardağı") {
            Self::Cup
        } else if unit.contains("yemek kaşığı")
            || unit == "yk"
            || (unit.contains("kaşık") && !unit.contains("tatlı") && !unit.contains("çay"))
        {
            Self::Tablespoon
        } else if unit.contains("tatlı kaşığı") || unit == "tk" {
            Self::Teaspoon
        } else if unit.contains("çay kaşığı") || unit == "çk" {
            Self::CoffeeSpoon
        } else if unit.contains("paket") {
            Self::Packet
        } else if unit.contains("demet") || unit.contains("bağ") {
            Self::Bunch
        } else {
            Self::Unknown
        }
    }

    /// Base units in one of this measure of the named ingredient.
    pub fn base_units(self, ingredient_name: &str) -> f64 {
        match self {
            Self::Kilo => 1000.0,
            Self::Base => 1.0,
            Self::Piece => lookup(PIECE_WEIGHTS, ingredient_name, 1.0),
            Self::Cup => lookup(CUP_WEIGHTS, ingredient_name, 200.0),
            Self::Tablespoon => lookup(TABLESPOON_WEIGHTS, ingredient_name, 15.0),
            Self::Teaspoon => lookup(TEASPOON_WEIGHTS, ingredient_name, 10.0),
            Self::CoffeeSpoon => lookup(COFFEE_SPOON_WEIGHTS, ingredient_name, 5.0),
            Self::Packet => lookup(PACKET_WEIGHTS, ingredient_name, 1.0),
            Self::Bunch => 50.0,
            Self::Unknown => 1.0,
        }
    }
}

/// Case-insensitive substring match of `ingredient_name` against each row of `table`, in order.
pub fn lookup(table: WeightTable, ingredient_name: &str, default: f64) -> f64 {
    let name = ingredient_name.to_lowercase();
    table
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|&(_, weight)| weight)
        .unwrap_or(default)
}

/// How many base units one `unit` of `ingredient_name` is. Never fails: anything unrecognized
/// counts as one base unit.
pub fn base_multiplier(unit: &str, ingredient_name: &str) -> f64 {
    Measure::classify(unit).base_units(ingredient_name)
}

#[cfg(test)]
fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn fixed_units() {
    for name in ["un", "yumurta", "anything"] {
        assert_eq!(base_multiplier("kg", name), 1000.0);
        assert_eq!(base_multiplier("L", name), 1000.0);
        assert_eq!(base_multiplier(" Litre ", name), 1000.0);
        assert_eq!(base_multiplier("gr", name), 1.0);
        assert_eq!(base_multiplier("ml", name), 1.0);
        assert_eq!(base_multiplier("GRAM", name), 1.0);
        assert_eq!(
            base_multiplier("kg", name),
            1000.0 * base_multiplier("gr", name)
        );
    }
}

#[test]
fn classify_priority() {
    use Measure::*;

    assert_eq!(Measure::classify("kg"), Kilo);
    assert_eq!(Measure::classify("kgs"), Unknown);
    assert_eq!(Measure::classify("3 adet"), Piece);
    assert_eq!(Measure::classify("tane"), Piece);
    assert_eq!(Measure::classify("bardak"), Cup);
    assert_eq!(Measure::classify("Su Bardağı"), Cup);
    assert_eq!(Measure::classify("yemek kaşığı"), Tablespoon);
    assert_eq!(Measure::classify("YK"), Tablespoon);
    assert_eq!(Measure::classify("kaşık"), Tablespoon);
    assert_eq!(Measure::classify("tatlı kaşığı"), Teaspoon);
    assert_eq!(Measure::classify("tk"), Teaspoon);
    assert_eq!(Measure::classify("çay kaşığı"), CoffeeSpoon);
    assert_eq!(Measure::classify("çk"), CoffeeSpoon);
    assert_eq!(Measure::classify("paket"), Packet);
    assert_eq!(Measure::classify("demet"), Bunch);
    assert_eq!(Measure::classify("bağ"), Bunch);
    assert_eq!(Measure::classify("kutu"), Unknown);
    assert_eq!(Measure::classify(""), Unknown);
}

#[test]
fn piece_weights() {
    assert_eq!(base_multiplier("adet", "Yumurta"), 50.0);
    assert_eq!(base_multiplier("adet", "egg"), 50.0);
    assert_eq!(base_multiplier("adet", "eggplant"), 250.0);
    assert_eq!(base_multiplier("adet", "sivri biber"), 50.0);
    assert_eq!(base_multiplier("adet", "kapya"), 150.0);
    assert_eq!(base_multiplier("adet", "kapya biber"), 50.0);
    assert_eq!(base_multiplier("adet", "bell pepper"), 150.0);
    assert_eq!(base_multiplier("tane", "patates"), 200.0);
    assert_eq!(base_multiplier("adet", "ekmek"), 250.0);
    assert_eq!(base_multiplier("adet", "kiwi"), 1.0);
}

#[test]
fn spoon_and_cup_weights() {
    assert_eq!(base_multiplier("su bardağı", "un"), 110.0);
    assert_eq!(base_multiplier("bardak", "pirinç"), 180.0);
    assert_eq!(base_multiplier("bardak", "kiwi"), 200.0);

    assert_eq!(base_multiplier("yemek kaşığı", "domates salçası"), 25.0);
    assert_eq!(base_multiplier("yk", "tuz"), 18.0);
    assert_eq!(base_multiplier("yemek kaşığı", "un"), 10.0);
    assert_eq!(base_multiplier("yemek kaşığı", "flour"), 10.0);
    assert_eq!(base_multiplier("yk", "kiwi"), 15.0);

    assert_eq!(base_multiplier("tatlı kaşığı", "kakao"), 5.0);
    assert_eq!(base_multiplier("tk", "kiwi"), 10.0);

    assert_eq!(base_multiplier("çay kaşığı", "tuz"), 6.0);
    assert_eq!(base_multiplier("çk", "kabartma tozu"), 5.0);
    assert_eq!(base_multiplier("çk", "kiwi"), 5.0);
}

#[test]
fn english_names_are_not_caught_by_turkish_fragments() {
    assert_eq!(base_multiplier("su bardağı", "sunflower oil"), 200.0);
    assert_eq!(base_multiplier("yemek kaşığı", "sunflower oil"), 12.0);
    assert_eq!(base_multiplier("tatlı kaşığı", "sunflower oil"), 8.0);
    assert_eq!(base_multiplier("su bardağı", "brown sugar"), 200.0);
    assert_eq!(base_multiplier("su bardağı", "sunflower seeds"), 110.0);

    assert_eq!(base_multiplier("su bardağı", "ayçiçek yağı"), 200.0);
    assert_eq!(base_multiplier("su bardağı", "tam buğday unu"), 110.0);
    assert_eq!(base_multiplier("paket", "pasta kreması"), 200.0);
}

#[test]
fn packet_and_bunch_weights() {
    assert_eq!(base_multiplier("paket", "makarna"), 500.0);
    assert_eq!(base_multiplier("paket", "kabartma tozu"), 10.0);
    assert_eq!(base_multiplier("paket", "kiwi"), 1.0);
    assert_eq!(base_multiplier("demet", "maydanoz"), 50.0);
    assert_eq!(base_multiplier("bağ", "dereotu"), 50.0);
}

#[test]
fn unknown_units_are_one_base_unit() {
    for unit in ["kutu", "dilim", "", "cup"] {
        for name in ["un", "yumurta", "kiwi"] {
            assert_eq!(base_multiplier(unit, name), 1.0);
        }
    }
}

#[test]
fn conversion_round_trips() {
    for (unit, name) in [
        ("adet", "yumurta"),
        ("su bardağı", "un"),
        ("yk", "salça"),
        ("çk", "tuz"),
        ("kg", "patates"),
        ("paket", "vanilya"),
    ] {
        let m = base_multiplier(unit, name);
        for q in [0.0, 0.1, 1.0, 3.3, 17.0, 1234.5678] {
            assert_close((q * m) / m, q);
        }
    }
}

#[test]
fn every_measure_classifies_its_own_spellings() {
    for measure in Measure::iter().filter(|m| *m != Measure::Unknown) {
        for spelling in measure.to_string().split(", ") {
            assert_eq!(Measure::classify(spelling), measure, "{spelling}");
        }
    }
}
