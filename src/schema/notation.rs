/// `NdF` dice notation — parsing tokens like `2d20` and rendering pools back.

use super::die::{DicePool, Die, PoolError};

/// Largest number of dice a single token or pool may hold.
pub const MAX_DICE: u32 = 10_000;

/// Parse a single `<amount>d<faces>` token into `amount` dice.
///
/// Both parts must be positive integers and `amount` at most [`MAX_DICE`].
pub fn parse_token(token: &str) -> Result<Vec<Die>, PoolError> {
    let invalid = || PoolError::InvalidNotation(token.to_string());

    let (amount, faces) = token.split_once('d').ok_or_else(invalid)?;
    let amount: u32 = amount.parse().map_err(|_| invalid())?;
    let faces: u32 = faces.parse().map_err(|_| invalid())?;
    if amount == 0 || amount > MAX_DICE || faces == 0 {
        return Err(invalid());
    }

    let die = Die::new(faces)?;
    Ok(vec![die; amount as usize])
}

/// Parse space-separated dice tokens (`"2d20 1d6 1d4"`) into a pool.
pub fn parse_pool(input: &str) -> Result<DicePool, PoolError> {
    parse_tokens(input.split_whitespace())
}

/// Parse already-split dice tokens into a pool, keeping token order.
pub fn parse_tokens<'a, I>(tokens: I) -> Result<DicePool, PoolError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut dice = Vec::new();
    for token in tokens {
        let parsed = parse_token(token)?;
        if dice.len() + parsed.len() > MAX_DICE as usize {
            return Err(PoolError::InvalidNotation(token.to_string()));
        }
        dice.extend(parsed);
    }
    DicePool::new(dice)
}

/// Group dice by face count in order of first appearance.
pub fn group_by_faces(pool: &DicePool) -> Vec<(u32, u32)> {
    let mut groups: Vec<(u32, u32)> = Vec::new();
    for die in pool.iter() {
        match groups.iter_mut().find(|(faces, _)| *faces == die.faces()) {
            Some((_, count)) => *count += 1,
            None => groups.push((die.faces(), 1)),
        }
    }
    groups
}

/// Render a pool as canonical notation, coalescing identical face counts.
///
/// `1d6 1d6 1d4` renders as `2d6 1d4`.
pub fn canonical_string(pool: &DicePool) -> String {
    group_by_faces(pool)
        .iter()
        .map(|(faces, count)| format!("{}d{}", count, faces))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_expands_amount() {
        let dice = parse_token("3d8").unwrap();
        assert_eq!(dice.len(), 3);
        assert!(dice.iter().all(|d| d.faces() == 8 && d.current() == 1));
    }

    #[test]
    fn parse_token_rejects_bad_shapes() {
        for bad in ["d6", "2d", "2x6", "2d6d", "a2d6", "-1d6", "0d6", "2d0", "", "2d-6"] {
            assert_eq!(
                parse_token(bad),
                Err(PoolError::InvalidNotation(bad.to_string())),
                "token {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn parse_token_caps_amount() {
        let at_limit = parse_token(&format!("{}d6", MAX_DICE)).unwrap();
        assert_eq!(at_limit.len(), MAX_DICE as usize);
        assert_eq!(
            parse_token("4000000000d6"),
            Err(PoolError::InvalidNotation("4000000000d6".to_string()))
        );
    }

    #[test]
    fn parse_pool_caps_total_dice() {
        let input = format!("{}d6 1d4", MAX_DICE);
        assert_eq!(
            parse_pool(&input),
            Err(PoolError::InvalidNotation("1d4".to_string()))
        );
    }

    #[test]
    fn parse_pool_keeps_order() {
        let pool = parse_pool("2d20  1d6 1d4").unwrap();
        assert_eq!(pool.faces(), vec![20, 20, 6, 4]);
    }

    #[test]
    fn parse_pool_empty_input() {
        assert_eq!(parse_pool("   "), Err(PoolError::Empty));
    }

    #[test]
    fn canonical_string_coalesces() {
        let pool = parse_pool("1d6 1d6 1d4").unwrap();
        assert_eq!(canonical_string(&pool), "2d6 1d4");

        let pool = parse_pool("1d6 2d6").unwrap();
        assert_eq!(canonical_string(&pool), "3d6");
    }

    #[test]
    fn canonical_string_non_adjacent_groups() {
        let pool = parse_pool("1d8 1d4 2d8").unwrap();
        assert_eq!(canonical_string(&pool), "3d8 1d4");
        assert_eq!(group_by_faces(&pool), vec![(8, 3), (4, 1)]);
    }
}
