use crate::domain::Outfit;

/// Declarative rule: award `bonus` when `attribute` holds one of `values`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRule {
    pub attribute: &'static str,
    pub values: &'static [&'static str],
    pub bonus: f64,
}

impl AttributeRule {
    pub const fn new(attribute: &'static str, values: &'static [&'static str], bonus: f64) -> Self {
        Self {
            attribute,
            values,
            bonus,
        }
    }

    /// Missing attributes never match; comparison ignores ASCII case.
    pub fn matches(&self, outfit: &Outfit) -> bool {
        outfit
            .attribute(self.attribute)
            .map(|value| {
                let value = value.trim();
                self.values
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(value))
            })
            .unwrap_or(false)
    }
}

pub fn matching_rules<'a>(
    rules: &'a [AttributeRule],
    outfit: &'a Outfit,
) -> impl Iterator<Item = &'a AttributeRule> + 'a {
    rules.iter().filter(move |rule| rule.matches(outfit))
}

/// Sum of bonuses for every matching rule.
pub fn evaluate(rules: &[AttributeRule], outfit: &Outfit) -> f64 {
    matching_rules(rules, outfit).map(|rule| rule.bonus).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[AttributeRule] = &[
        AttributeRule::new("outer", &["No"], 1.0),
        AttributeRule::new("fabric_upper", &["cotton", "chiffon"], 2.0),
    ];

    #[test]
    fn evaluates_only_matching_rules() {
        let outfit = Outfit::from_attributes([("outer", "no"), ("fabric_upper", "denim")]);

        assert_eq!(evaluate(RULES, &outfit), 1.0);
        assert_eq!(matching_rules(RULES, &outfit).count(), 1);
    }

    #[test]
    fn missing_attributes_contribute_nothing() {
        let outfit = Outfit::from_attributes([("hat", "Yes")]);
        assert_eq!(evaluate(RULES, &outfit), 0.0);
    }
}
