/// Groups IIS constraint names by family for the coordinator's infeasibility
/// report (spec §4.6: "a grouped explanation — constraint family -> count").
///
/// Builders name constraints `<family>_<detail>` (e.g. `rest_gap_n3_d5`), so
/// the family is the name's leading `_`-delimited segment. Names with no
/// underscore are their own family.
pub fn group_by_family(names: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in names {
        let family = name.split('_').next().unwrap_or(name).to_string();
        match counts.iter_mut().find(|(f, _)| *f == family) {
            Some((_, n)) => *n += 1,
            None => counts.push((family, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_orders_by_descending_count() {
        let names = vec![
            "rest_gap_n3_d5".to_string(),
            "rest_gap_n1_d2".to_string(),
            "demand_cover_d5".to_string(),
        ];
        let grouped = group_by_family(&names);
        assert_eq!(grouped[0], ("rest".to_string(), 2));
        assert_eq!(grouped[1], ("demand".to_string(), 1));
    }

    #[test]
    fn name_without_underscore_is_its_own_family() {
        let grouped = group_by_family(&["flow".to_string()]);
        assert_eq!(grouped, vec![("flow".to_string(), 1)]);
    }
}
