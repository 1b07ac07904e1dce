//! Locale-aware field generation using curated lists.
//!
//! RULE: locale and region are explicit arguments on every call.
//! There is no shared "current locale" to set beforehand.
//! All generation is deterministic (same stream cursor = same fields).

use crate::{
    error::FeedResult,
    locale::{Locale, Region},
    rng::SeedStream,
};

/// The external faking capability.
///
/// Implementations must draw every random choice from `rng`, otherwise
/// the seed stops governing the raw field values.
pub trait LocaleFaker: Send + Sync {
    /// A full name, "First Last".
    fn name(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String>;

    /// A postal address, "street, city, country".
    fn address(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String>;

    /// A phone number formatted for the region.
    fn phone(&self, region: Region, rng: &mut SeedStream) -> FeedResult<String>;
}

/// Default faker backed by the built-in lists below.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuratedFaker;

impl LocaleFaker for CuratedFaker {
    fn name(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String> {
        let data = LocaleData::for_locale(locale);
        let first = rng.pick(data.first_names);
        let last = rng.pick(data.last_names);
        Ok(format!("{first} {last}"))
    }

    fn address(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String> {
        let data = LocaleData::for_locale(locale);
        let street = Self::street_address(locale, data, rng);
        let city = rng.pick(data.cities);
        let country = rng.pick(data.countries);
        Ok(format!("{street}, {city}, {country}"))
    }

    fn phone(&self, region: Region, rng: &mut SeedStream) -> FeedResult<String> {
        let pattern = rng.pick(phone_patterns(region));
        Ok(fill_digits(pattern, rng))
    }
}

impl CuratedFaker {
    fn street_address(locale: Locale, data: &LocaleData, rng: &mut SeedStream) -> String {
        let street = rng.pick(data.streets);
        let building = 1 + rng.next_below(199);
        match locale {
            // "ul. Długa 12" or "ul. Długa 12/4"
            Locale::Pl => {
                if rng.chance(0.4) {
                    format!("{street} {building}/{}", 1 + rng.next_below(60))
                } else {
                    format!("{street} {building}")
                }
            }
            // "742 Maple Street"
            Locale::En => format!("{building} {street}"),
            // "რუსთაველის გამზირი 12"
            Locale::Ka => format!("{street} {building}"),
        }
    }
}

/// Replace every '#' in `pattern` with a random digit.
pub fn fill_digits(pattern: &str, rng: &mut SeedStream) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.next_below(10) as u8),
            other => other,
        })
        .collect()
}

fn phone_patterns(region: Region) -> &'static [&'static str] {
    match region {
        Region::Poland => &["+48 ### ### ###", "### ### ###", "## ### ## ##"],
        Region::Usa => &["(###) ###-####", "###-###-####", "+1 ### ### ####"],
        Region::Georgia => &["+995 5## ## ## ##", "5## ### ###", "+995 32 2## ## ##"],
    }
}

struct LocaleData {
    first_names: &'static [&'static str],
    last_names: &'static [&'static str],
    streets: &'static [&'static str],
    cities: &'static [&'static str],
    countries: &'static [&'static str],
}

impl LocaleData {
    fn for_locale(locale: Locale) -> &'static LocaleData {
        match locale {
            Locale::Pl => &POLISH,
            Locale::En => &ENGLISH,
            Locale::Ka => &GEORGIAN,
        }
    }
}

static POLISH: LocaleData = LocaleData {
    first_names: &[
        "Jan", "Anna", "Piotr", "Katarzyna", "Krzysztof", "Małgorzata", "Andrzej",
        "Agnieszka", "Tomasz", "Barbara", "Paweł", "Ewa", "Michał", "Magdalena",
        "Łukasz", "Zofia", "Wojciech", "Joanna", "Jakub", "Aleksandra", "Marcin",
        "Dorota", "Grzegorz", "Beata", "Mateusz", "Elżbieta",
    ],
    last_names: &[
        "Nowak", "Kowalski", "Wiśniewski", "Wójcik", "Kowalczyk", "Kamiński",
        "Lewandowski", "Zieliński", "Szymański", "Woźniak", "Dąbrowski", "Kozłowski",
        "Jankowski", "Mazur", "Kwiatkowski", "Krawczyk", "Piotrowski", "Grabowski",
        "Nowakowski", "Pawłowski", "Michalski", "Król",
    ],
    streets: &[
        "ul. Marszałkowska", "ul. Długa", "ul. Polna", "ul. Leśna", "ul. Słoneczna",
        "ul. Krótka", "ul. Szkolna", "ul. Ogrodowa", "ul. Lipowa", "ul. Kościuszki",
        "ul. Mickiewicza", "ul. Sienkiewicza", "al. Jerozolimskie", "ul. Piłsudskiego",
    ],
    cities: &[
        "Warszawa", "Kraków", "Łódź", "Wrocław", "Poznań", "Gdańsk", "Szczecin",
        "Bydgoszcz", "Lublin", "Katowice", "Białystok", "Rzeszów", "Toruń", "Opole",
    ],
    countries: &[
        "Polska", "Niemcy", "Czechy", "Słowacja", "Litwa", "Ukraina", "Francja",
        "Hiszpania", "Włochy", "Szwecja",
    ],
};

static ENGLISH: LocaleData = LocaleData {
    first_names: &[
        "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
        "Thomas", "Charles", "Mary", "Patricia", "Jennifer", "Linda", "Barbara",
        "Elizabeth", "Susan", "Jessica", "Sarah", "Karen", "Emily", "Olivia", "Noah",
        "Ethan", "Grace", "Henry",
    ],
    last_names: &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Rodriguez", "Martinez", "Wilson", "Anderson", "Taylor", "Moore", "Jackson",
        "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis",
    ],
    streets: &[
        "Maple Street", "Oak Avenue", "Pine Road", "Cedar Lane", "Elm Street",
        "Washington Avenue", "Lake Drive", "Hillcrest Road", "Park Place",
        "Sunset Boulevard", "Main Street", "Church Street", "River Road", "Mill Lane",
    ],
    cities: &[
        "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton",
        "Fairview", "Salem", "Madison", "Georgetown", "Arlington", "Ashland",
        "Dover", "Oxford",
    ],
    countries: &[
        "United States", "Canada", "Mexico", "United Kingdom", "Ireland", "Germany",
        "France", "Japan", "Australia", "New Zealand",
    ],
};

static GEORGIAN: LocaleData = LocaleData {
    first_names: &[
        "გიორგი", "ნინო", "დავით", "მარიამ", "ლევან", "თამარ", "ნიკა", "ანა",
        "ლუკა", "ეკატერინე", "ზურაბ", "ქეთევან", "ირაკლი", "სალომე", "ბექა",
        "ნათია", "ალექსანდრე", "მაკა", "გიგა", "ელენე",
    ],
    last_names: &[
        "ბერიძე", "კაპანაძე", "გელაშვილი", "მაისურაძე", "გიორგაძე", "ლომიძე",
        "წიკლაური", "ბოლქვაძე", "კვარაცხელია", "ნოზაძე", "ხუციშვილი", "შენგელია",
        "ჯაფარიძე", "მამულაშვილი", "ცერცვაძე", "ხარაიშვილი",
    ],
    streets: &[
        "რუსთაველის გამზირი", "ჭავჭავაძის გამზირი", "აღმაშენებლის გამზირი",
        "პეკინის ქუჩა", "ვაჟა-ფშაველას გამზირი", "კოსტავას ქუჩა",
        "წერეთლის გამზირი", "გორგასლის ქუჩა", "ბარათაშვილის ქუჩა",
    ],
    cities: &[
        "თბილისი", "ბათუმი", "ქუთაისი", "რუსთავი", "გორი", "ზუგდიდი", "ფოთი",
        "თელავი", "ხაშური", "სამტრედია",
    ],
    countries: &[
        "საქართველო", "სომხეთი", "აზერბაიჯანი", "თურქეთი", "უკრაინა", "გერმანია",
        "საფრანგეთი", "იტალია",
    ],
};
