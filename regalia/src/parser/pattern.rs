use crate::regex::charclass::{CLASS_SPECIAL, SPECIAL};
use crate::regex::{
    Bound, Charclass, Conc, Mult, Multiplicand, Multiplier, Pattern, ONE, PLUS, QM, STAR,
};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{char, digit0, none_of, one_of, satisfy};
use nom::combinator::{map, map_opt, map_res, opt, recognize, success, value};
use nom::multi::{fold_many0, many0, separated_list1};
use nom::sequence::{delimited, pair, preceded, separated_pair};
use nom::IResult;

pub(crate) fn full_pattern(input: &str) -> IResult<&str, Pattern> {
    pattern(input)
}

fn pattern(input: &str) -> IResult<&str, Pattern> {
    map_opt(separated_list1(char('|'), conc), Pattern::new)(input)
}

fn conc(input: &str) -> IResult<&str, Conc> {
    map(many0(mult), Conc::new)(input)
}

fn mult(input: &str) -> IResult<&str, Mult> {
    map(pair(multiplicand, multiplier), |(multiplicand, multiplier)| {
        Mult::new(multiplicand, multiplier)
    })(input)
}

fn multiplicand(input: &str) -> IResult<&str, Multiplicand> {
    alt((group, map(charclass, Multiplicand::Class)))(input)
}

/// `(...)`, `(?:...)` or `(?P<name>...)`. Group kind and name carry no
/// meaning in a language algebra and are discarded.
fn group(input: &str) -> IResult<&str, Multiplicand> {
    map(
        delimited(pair(char('('), opt(group_prefix)), pattern, char(')')),
        Multiplicand::Group,
    )(input)
}

fn group_prefix(input: &str) -> IResult<&str, ()> {
    preceded(
        char('?'),
        alt((
            value((), char(':')),
            value((), delimited(tag("P<"), take_until(">"), char('>'))),
        )),
    )(input)
}

fn multiplier(input: &str) -> IResult<&str, Multiplier> {
    alt((
        braced_multiplier,
        value(QM, char('?')),
        value(STAR, char('*')),
        value(PLUS, char('+')),
        success(ONE),
    ))(input)
}

/// `{n}`, `{n,}` or `{n,m}`. A missing bound is infinite, so `{,m}` and
/// inverted ranges fall out of [Multiplier::new] and fail the production.
fn braced_multiplier(input: &str) -> IResult<&str, Multiplier> {
    map_opt(
        delimited(
            char('{'),
            pair(bound, opt(preceded(char(','), bound))),
            char('}'),
        ),
        |(lower, upper)| Multiplier::new(lower, upper.unwrap_or(lower)),
    )(input)
}

fn bound(input: &str) -> IResult<&str, Bound> {
    alt((finite_bound, success(Bound::Inf)))(input)
}

/// A single `0` or a digit run without leading zeroes.
fn finite_bound(input: &str) -> IResult<&str, Bound> {
    alt((
        map_res(
            recognize(pair(one_of("123456789"), digit0)),
            |digits: &str| digits.parse().map(Bound::Finite),
        ),
        value(Bound::Finite(0), char('0')),
    ))(input)
}

fn charclass(input: &str) -> IResult<&str, Charclass> {
    alt((
        value(Charclass::any(), char('.')),
        shorthand_class,
        map(delimited(tag("[^"), class_interior, char(']')), |class| {
            class.negated()
        }),
        delimited(char('['), class_interior, char(']')),
        map(escaped_char, Charclass::single),
        map(none_of(SPECIAL), Charclass::single),
    ))(input)
}

fn shorthand_class(input: &str) -> IResult<&str, Charclass> {
    alt((
        value(Charclass::word(), tag("\\w")),
        value(Charclass::digit(), tag("\\d")),
        value(Charclass::whitespace(), tag("\\s")),
        value(Charclass::word().negated(), tag("\\W")),
        value(Charclass::digit().negated(), tag("\\D")),
        value(Charclass::whitespace().negated(), tag("\\S")),
    ))(input)
}

/// Zero or more shorthands, ranges and characters, unioned together. The
/// empty interior is allowed and matches nothing.
fn class_interior(input: &str) -> IResult<&str, Charclass> {
    fold_many0(
        class_item,
        || Charclass::new([], false),
        |acc, item| acc.union(&item),
    )(input)
}

fn class_item(input: &str) -> IResult<&str, Charclass> {
    alt((
        shorthand_class,
        char_range,
        map(class_char, Charclass::single),
    ))(input)
}

/// `a-z` style range, strictly increasing: `d-d` and `e-a` do not parse.
fn char_range(input: &str) -> IResult<&str, Charclass> {
    map_opt(
        separated_pair(class_char, char('-'), class_char),
        |(first, last)| (first < last).then(|| Charclass::new(first..=last, false)),
    )(input)
}

fn class_char(input: &str) -> IResult<&str, char> {
    alt((
        control_escape,
        special_escape(CLASS_SPECIAL),
        hex_escape,
        none_of(CLASS_SPECIAL),
    ))(input)
}

fn escaped_char(input: &str) -> IResult<&str, char> {
    alt((control_escape, special_escape(SPECIAL), hex_escape))(input)
}

fn control_escape(input: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        alt((
            value('\t', char('t')),
            value('\n', char('n')),
            value('\x0B', char('v')),
            value('\x0C', char('f')),
            value('\r', char('r')),
        )),
    )(input)
}

fn special_escape(specials: &'static str) -> impl Fn(&str) -> IResult<&str, char> {
    move |input| preceded(char('\\'), one_of(specials))(input)
}

/// `\xHH` with exactly two hex digits, case-insensitive.
fn hex_escape(input: &str) -> IResult<&str, char> {
    map_opt(
        preceded(tag("\\x"), recognize(pair(hex_digit, hex_digit))),
        |digits| u32::from_str_radix(digits, 16).ok().and_then(char::from_u32),
    )(input)
}

fn hex_digit(input: &str) -> IResult<&str, char> {
    satisfy(|c| c.is_ascii_hexdigit())(input)
}
