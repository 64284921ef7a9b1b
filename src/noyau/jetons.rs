// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreurs::Motif;
use super::lecture::format_rat;

/// Opérateurs binaires de l’alphabet numérique : + - * / ^ %
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,   // ^
    Percent, // % (reste tronqué)
}

impl Operateur {
    pub const TOUS: [Operateur; 6] = [
        Operateur::Plus,
        Operateur::Minus,
        Operateur::Star,
        Operateur::Slash,
        Operateur::Caret,
        Operateur::Percent,
    ];

    /// Symbole exact (un seul caractère) -> opérateur.
    pub fn from_symbole(s: &str) -> Option<Self> {
        let mut it = s.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Star),
            '/' => Some(Self::Slash),
            '^' => Some(Self::Caret),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Percent => "%",
        }
    }

    /// + - < * / % < ^
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Star | Self::Slash | Self::Percent => 2,
            Self::Caret => 3,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Self::Caret)
    }
}

/// Vrai ssi `token` est exactement un des six symboles numériques.
pub fn is_operator(token: &str) -> bool {
    Operateur::from_symbole(token).is_some()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),
    Op(Operateur),
    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 12.5, .5, 5.) -> Num exact (12.5 = 25/2)
/// - opérateurs + - * / ^ %
/// - parenthèses ( )
///
/// Tout autre caractère (lettres, ponctuation) est refusé avec sa position.
/// Entrée vide (ou seulement des espaces) => Motif::Vide.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, Motif> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            _ => {}
        }

        if let Some(op) = Operateur::from_char(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        // Nombre : suite contiguë de chiffres et de points
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push(Tok::Num(parse_decimal(&texte)?));
            continue;
        }

        return Err(Motif::CaractereInattendu { c, position: i });
    }

    if out.is_empty() {
        return Err(Motif::Vide);
    }

    Ok(out)
}

/// "123.45" -> 12345/100 (exact). Un seul point, au moins un chiffre.
fn parse_decimal(texte: &str) -> Result<BigRational, Motif> {
    let invalide = || Motif::NombreInvalide(texte.to_string());

    let (entier, frac) = texte.split_once('.').unwrap_or((texte, ""));
    if frac.contains('.') || (entier.is_empty() && frac.is_empty()) {
        return Err(invalide());
    }

    let chiffres = format!("{entier}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
    let exposant = u32::try_from(frac.len()).map_err(|_| invalide())?;
    let d = BigInt::from(10).pow(exposant);

    Ok(BigRational::new(n, d))
}

/// Format utilitaire (traces / démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
