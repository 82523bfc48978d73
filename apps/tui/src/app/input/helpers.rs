pub const fn step_up(index: usize) -> usize {
    index.saturating_sub(1)
}

pub const fn step_down(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index + 1 < len {
        index + 1
    } else {
        index
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clamps_at_both_ends() {
        assert_eq!(step_up(0), 0);
        assert_eq!(step_down(2, 3), 2);
        assert_eq!(step_down(0, 0), 0);
    }

    #[test]
    fn wrapping_cycles_through_the_list() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(5, 0), 0);
    }
}
