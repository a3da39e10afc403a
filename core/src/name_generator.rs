//! Deterministic person and company identity generation from curated lists.
//!
//! All generation is deterministic (same RNG stream = same identities).

use crate::rng::StreamRng;

/// Deterministic identity generator using curated word lists.
pub struct NameGenerator;

impl NameGenerator {
    /// Generate a (first, last) name pair deterministically.
    pub fn name_parts(rng: &mut StreamRng) -> (&'static str, &'static str) {
        (
            *rng.pick(Self::first_names()),
            *rng.pick(Self::last_names()),
        )
    }

    /// Generate a full name (first + last).
    pub fn full_name(rng: &mut StreamRng) -> String {
        let (first, last) = Self::name_parts(rng);
        format!("{first} {last}")
    }

    /// Company name: "Prefix Industry Suffix" or "LastName Industry Suffix".
    pub fn company_name(rng: &mut StreamRng) -> String {
        let industry = *rng.pick(Self::company_descriptors());
        let suffix = *rng.pick(Self::company_suffixes());
        if rng.chance(0.5) {
            let prefix = *rng.pick(Self::company_prefixes());
            format!("{prefix} {industry} {suffix}")
        } else {
            let last = *rng.pick(Self::last_names());
            format!("{last} {industry} {suffix}")
        }
    }

    /// Email derived from the name plus a random mail domain.
    pub fn email(first: &str, last: &str, rng: &mut StreamRng) -> String {
        let domain = *rng.pick(Self::mail_domains());
        format!("{}.{}@{}", first.to_lowercase(), last.to_lowercase(), domain)
    }

    /// North-American style phone number.
    pub fn phone(rng: &mut StreamRng) -> String {
        let area = 200 + rng.next_u64_below(700);
        let exchange = 200 + rng.next_u64_below(700);
        let line = rng.next_u64_below(10_000);
        format!("({area}) {exchange}-{line:04}")
    }

    /// Industry label for a customer account.
    pub fn industry(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::industries())
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
            "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
            "Thomas", "Sarah", "Daniel", "Karen", "Matthew", "Lisa", "Anthony", "Nancy",
            "Mark", "Sandra", "Steven", "Ashley", "Andrew", "Emily", "Joshua", "Michelle",
            "Kevin", "Amanda", "Brian", "Melissa", "George", "Stephanie", "Timothy", "Rebecca",
            "Ronald", "Laura", "Jason", "Helen", "Ryan", "Amy", "Jacob", "Angela",
            "Nicholas", "Anna", "Eric", "Brenda", "Jonathan", "Pamela", "Stephen", "Nicole",
            "Justin", "Samantha", "Scott", "Katherine", "Brandon", "Christine", "Benjamin", "Rachel",
            "Samuel", "Carolyn", "Gregory", "Janet", "Alexander", "Maria", "Patrick", "Heather",
            "Jack", "Diane", "Dennis", "Olivia", "Tyler", "Julie", "Aaron", "Victoria",
            "Adam", "Kelly", "Nathan", "Lauren", "Henry", "Christina", "Zachary", "Joan",
            "Peter", "Evelyn", "Kyle", "Megan", "Noah", "Hannah", "Ethan", "Andrea",
            "Sean", "Grace", "Austin", "Sophia", "Carl", "Charlotte", "Dylan", "Natalie",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
            "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
            "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson",
            "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen",
            "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera",
            "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
            "Turner", "Diaz", "Parker", "Cruz", "Edwards", "Collins", "Reyes", "Stewart",
            "Morris", "Murphy", "Cook", "Rogers", "Ortiz", "Morgan", "Cooper", "Peterson",
            "Bailey", "Reed", "Kelly", "Howard", "Kim", "Cox", "Ward", "Richardson",
            "Watson", "Brooks", "Chavez", "Wood", "Bennett", "Gray", "Mendoza", "Hughes",
            "Price", "Alvarez", "Castillo", "Sanders", "Patel", "Myers", "Long", "Ross",
            "Foster", "Powell", "Jenkins", "Perry", "Russell", "Sullivan", "Bell", "Chen",
        ]
    }

    fn company_prefixes() -> &'static [&'static str] {
        &[
            "Apex", "Summit", "Pioneer", "Vertex", "Horizon", "Beacon", "Catalyst",
            "Keystone", "Meridian", "Northstar", "Pinnacle", "Quantum", "Sterling",
            "Vanguard", "Cascade", "Frontier", "Lighthouse", "Momentum",
        ]
    }

    fn company_descriptors() -> &'static [&'static str] {
        &[
            "Analytics", "Logistics", "Manufacturing", "Consulting", "Software",
            "Digital", "Medical", "Financial", "Retail", "Media", "Energy",
            "Robotics", "Packaging", "Staffing", "Insurance", "Hospitality",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &[
            "LLC", "Inc", "Corp", "Group", "Partners", "Solutions", "Services",
            "Holdings", "Ventures", "Systems", "Technologies", "Labs",
        ]
    }

    fn mail_domains() -> &'static [&'static str] {
        &[
            "gmail.com", "outlook.com", "company.com", "business.org",
            "enterprise.net", "corp.com", "inc.com", "solutions.com",
        ]
    }

    fn industries() -> &'static [&'static str] {
        &[
            "Technology", "Healthcare", "Finance", "Manufacturing",
            "Retail", "Education", "Government", "Non-Profit",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, TableSlot};

    #[test]
    fn identity_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_table(TableSlot::Customer);
        let mut rng2 = RngBank::new(12345).for_table(TableSlot::Customer);

        assert_eq!(
            NameGenerator::full_name(&mut rng1),
            NameGenerator::full_name(&mut rng2),
            "Same seed should produce same name"
        );
        assert_eq!(NameGenerator::phone(&mut rng1), NameGenerator::phone(&mut rng2));
    }

    #[test]
    fn generates_valid_full_names() {
        let mut rng = RngBank::new(12345).for_table(TableSlot::Customer);
        for _ in 0..100 {
            let name = NameGenerator::full_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {name}");
        }
    }

    #[test]
    fn email_is_lowercased_name_at_known_domain() {
        let mut rng = RngBank::new(1).for_table(TableSlot::Customer);
        let email = NameGenerator::email("Ada", "Lovelace", &mut rng);
        assert!(email.starts_with("ada.lovelace@"), "unexpected email: {email}");
        let domain = email.split('@').nth(1).unwrap();
        assert!(NameGenerator::mail_domains().contains(&domain));
    }

    #[test]
    fn phone_has_expected_shape() {
        let mut rng = RngBank::new(2).for_table(TableSlot::Customer);
        for _ in 0..50 {
            let phone = NameGenerator::phone(&mut rng);
            assert_eq!(phone.len(), "(555) 555-5555".len(), "bad phone: {phone}");
            assert!(phone.starts_with('('));
        }
    }
}
