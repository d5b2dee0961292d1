//! Bilingual names, emails and phone numbers.

use fake::{Fake, faker::number::en::NumberWithFormat};
use rand::Rng;
use time::OffsetDateTime;

use school::{Bilingual, Gender, PersonBase, Role};

use super::new_id;
use crate::error::Result;
use crate::tables::{NameGroup, SeedName, SeedTables};

/// A generated identity, not yet bound to an id.
#[derive(Debug, Clone)]
pub struct GeneratedIdentity {
    pub first_name: Bilingual,
    pub family_name: Bilingual,
    pub name: Bilingual,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
}

impl GeneratedIdentity {
    /// Binds the identity to a fresh id.
    pub fn into_base(self, created_at: OffsetDateTime, rng: &mut impl Rng) -> PersonBase {
        PersonBase {
            id: new_id(rng),
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Generates people's names from the seed tables.
#[derive(Debug, Clone)]
pub struct IdentityGenerator {
    tables: SeedTables,
}

impl IdentityGenerator {
    /// Creates a generator over the built-in tables.
    pub fn new() -> Self {
        Self {
            tables: SeedTables::builtin(),
        }
    }

    /// Creates a generator over custom tables, rejecting empty ones.
    pub fn with_tables(tables: SeedTables) -> Result<Self> {
        tables.validate()?;
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &SeedTables {
        &self.tables
    }

    /// Generates an identity. A gender is drawn with even odds when none is given.
    ///
    /// The surname comes from the first name's group when that group has one.
    pub fn generate(
        &self,
        role: Role,
        gender: Option<Gender>,
        rng: &mut impl Rng,
    ) -> GeneratedIdentity {
        let gender = gender.unwrap_or_else(|| Gender::ALL[rng.gen_range(0..Gender::ALL.len())]);
        let first = self.pick_first_name(gender, rng);
        let last = self.pick_last_name(first.group, rng);

        self.assemble(
            role,
            gender,
            Bilingual::new(first.en, first.hi),
            Bilingual::new(last.en, last.hi),
            rng,
        )
    }

    /// Generates an identity that carries an existing family name.
    pub fn generate_in_family(
        &self,
        role: Role,
        gender: Gender,
        family_name: &Bilingual,
        rng: &mut impl Rng,
    ) -> GeneratedIdentity {
        let first = self.pick_first_name(gender, rng);
        self.assemble(
            role,
            gender,
            Bilingual::new(first.en, first.hi),
            family_name.clone(),
            rng,
        )
    }

    fn assemble(
        &self,
        role: Role,
        gender: Gender,
        first_name: Bilingual,
        family_name: Bilingual,
        rng: &mut impl Rng,
    ) -> GeneratedIdentity {
        let name = first_name.join(&family_name, " ");
        let email = email_for(role, &first_name.en, &family_name.en);
        let phone: String = NumberWithFormat("+91 9#########").fake_with_rng(rng);

        GeneratedIdentity {
            first_name,
            family_name,
            name,
            gender,
            email,
            phone,
        }
    }

    fn pick_first_name(&self, gender: Gender, rng: &mut impl Rng) -> SeedName {
        let names = self.tables.first_names(gender);
        names[rng.gen_range(0..names.len())]
    }

    fn pick_last_name(&self, group: NameGroup, rng: &mut impl Rng) -> SeedName {
        let same_group: Vec<&SeedName> = self
            .tables
            .last_names
            .iter()
            .filter(|n| n.group == group)
            .collect();

        if same_group.is_empty() {
            let all = self.tables.last_names;
            all[rng.gen_range(0..all.len())]
        } else {
            *same_group[rng.gen_range(0..same_group.len())]
        }
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Email domain per role.
pub fn email_domain(role: Role) -> &'static str {
    match role {
        Role::Student => "student.demoschool.edu",
        Role::Parent => "parent.demoschool.edu",
        Role::Teacher => "demoschool.edu",
        Role::PreschoolChild => "preschool.demoschool.edu",
    }
}

/// `first.last@<role domain>`, lower-cased with non-alphanumerics removed.
pub fn email_for(role: Role, first: &str, last: &str) -> String {
    let normalize = |part: &str| -> String {
        part.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect()
    };

    format!(
        "{}.{}@{}",
        normalize(first),
        normalize(last),
        email_domain(role)
    )
}

/// The last word of each language of a full name.
pub fn family_name_of(name: &Bilingual) -> Bilingual {
    let last_word = |s: &str| s.split_whitespace().last().unwrap_or(s).to_string();
    Bilingual::new(last_word(&name.en), last_word(&name.hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::names;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_identity() {
        let identity_gen = IdentityGenerator::new();
        let mut rng = rand::thread_rng();
        let identity = identity_gen.generate(Role::Student, None, &mut rng);

        assert!(identity.name.is_complete());
        assert!(identity.email.ends_with("@student.demoschool.edu"));
        assert!(identity.phone.starts_with("+91 9"));
        assert_eq!(identity.phone.len(), "+91 9876543210".len());
        assert!(identity.phone[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_requested_gender_is_respected() {
        let identity_gen = IdentityGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let identity = identity_gen.generate(Role::Teacher, Some(Gender::Female), &mut rng);
            assert_eq!(identity.gender, Gender::Female);
            assert!(
                names::FEMALE_FIRST_NAMES
                    .iter()
                    .any(|n| n.en == identity.first_name.en && n.hi == identity.first_name.hi)
            );
        }
    }

    #[test]
    fn test_surname_prefers_first_name_group() {
        let identity_gen = IdentityGenerator::new();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let identity = identity_gen.generate(Role::Parent, None, &mut rng);
            let first = names::MALE_FIRST_NAMES
                .iter()
                .chain(names::FEMALE_FIRST_NAMES)
                .find(|n| n.en == identity.first_name.en)
                .unwrap();
            let last = names::LAST_NAMES
                .iter()
                .find(|n| n.en == identity.family_name.en)
                .unwrap();
            // Every built-in group has surnames, so the preference always applies.
            assert_eq!(first.group, last.group);
            // Both languages come from the same table entry.
            assert_eq!(last.hi, identity.family_name.hi);
        }
    }

    #[test]
    fn test_surname_falls_back_without_group_match() {
        const ONLY_SOUTH: &[SeedName] = &[SeedName {
            en: "Iyer",
            hi: "अय्यर",
            group: NameGroup::South,
        }];
        const ONLY_NORTH: &[SeedName] = &[SeedName {
            en: "Kabir",
            hi: "कबीर",
            group: NameGroup::North,
        }];
        let tables = SeedTables {
            male_first_names: ONLY_NORTH,
            female_first_names: ONLY_NORTH,
            last_names: ONLY_SOUTH,
            ..SeedTables::builtin()
        };
        let identity_gen = IdentityGenerator::with_tables(tables).unwrap();
        let identity = identity_gen.generate(Role::Student, None, &mut rand::thread_rng());

        assert_eq!(identity.name.en, "Kabir Iyer");
        assert_eq!(identity.name.hi, "कबीर अय्यर");
    }

    #[test]
    fn test_empty_tables_rejected() {
        let tables = SeedTables {
            female_first_names: &[],
            ..SeedTables::builtin()
        };
        assert!(IdentityGenerator::with_tables(tables).is_err());
    }

    #[test]
    fn test_email_format() {
        assert_eq!(
            email_for(Role::Teacher, "Meera", "Iyer"),
            "meera.iyer@demoschool.edu"
        );
        assert_eq!(
            email_for(Role::Parent, "Harleen", "Gill"),
            "harleen.gill@parent.demoschool.edu"
        );
    }

    #[test]
    fn test_family_name_in_both_languages() {
        let family = family_name_of(&Bilingual::new("Aarav Sharma", "आरव शर्मा"));
        assert_eq!(family, Bilingual::new("Sharma", "शर्मा"));

        let identity = IdentityGenerator::new().generate_in_family(
            Role::Parent,
            Gender::Male,
            &family,
            &mut rand::thread_rng(),
        );
        assert!(identity.name.en.ends_with(" Sharma"));
        assert!(identity.name.hi.ends_with(" शर्मा"));
    }
}
