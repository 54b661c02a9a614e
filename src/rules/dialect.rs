//! Rule 11: dialectal and colloquial lexical normalization.
//!
//! Token-level substitution from a base variants map. Documents tagged with
//! the Asturian dialect marker additionally get an Asturian map that overrides
//! the base map, plus a clitic-splitting step that detaches pronominal
//! clitics written with a hyphen (`contó-y` → `contó le`) before dictionary
//! lookup. Tokens touching a colon are exempt so the colon rule's leftovers
//! stay analyzable.
//!
//! The dialect is resolved once per document from its file id and threaded in
//! as a value; no rule inspects filenames.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;
use crate::rules::{char_at, char_before, squash_spaces};

/// The lexical-substitution profile of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectProfile {
    #[default]
    Neutral,
    Asturian,
}

impl DialectProfile {
    /// Asturian interviews carry the `014` corpus prefix in their file ids.
    pub fn from_file_id(file_id: &str) -> DialectProfile {
        if file_id.starts_with("014") { DialectProfile::Asturian } else { DialectProfile::Neutral }
    }
}

pub(crate) fn rule() -> Rule {
    Rule { id: 11, phenomenon: "lexical normalization", apply: Box::new(apply) }
}

fn apply(text: &str, ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();
    let mut out = text.to_string();

    if ctx.dialect == DialectProfile::Asturian {
        out = split_clitics(&out, &mut events);
    }

    let spans = ProtectedSpans::scan_blocks(&out);
    let source = out;
    let mut rewritten = String::with_capacity(source.len());
    let mut last = 0;
    for m in regex!(r"\b[\w-]+\b").find_iter(&source) {
        if spans.overlaps(m.start(), m.end()) {
            continue;
        }
        // rule-2 leftovers are marked by an adjacent colon; leave them alone
        let left = char_before(&source, m.start());
        let right = char_at(&source, m.end());
        if left == Some(':') || right == Some(':') {
            continue;
        }
        let token = m.as_str();
        let Some((action, mapped)) = lookup(token, ctx.dialect) else { continue };
        rewritten.push_str(&source[last..m.start()]);
        rewritten.push_str(mapped);
        events.push(Rewrite::replaced(token, mapped, action));
        last = m.end();
    }
    rewritten.push_str(&source[last..]);

    Rewritten { text: squash_spaces(&rewritten), events }
}

fn lookup(token: &str, dialect: DialectProfile) -> Option<(&'static str, &'static str)> {
    if dialect == DialectProfile::Asturian {
        if let Some(mapped) = CLITIC_MAP.get(token) {
            return Some(("CLITIC_MAPPED", mapped));
        }
        if let Some(mapped) = ASTURIAN_MAP.get(token) {
            return Some(("LEXICAL_NORMALIZED", mapped));
        }
    }
    BASE_MAP.get(token).map(|mapped| ("LEXICAL_NORMALIZED", *mapped))
}

/// `BASE-CLIT` → `BASE le` (for `y`) or `BASE CLIT`; the detached clitic is
/// then resolved by the token pass.
fn split_clitics(text: &str, events: &mut Vec<Rewrite>) -> String {
    regex!(r"\b(\w{3,}|da|di)-(ylos|yles|ylo|ylu|yla|yos|ys|y)\b")
        .replace_all(text, |caps: &regex::Captures| {
            let base = &caps[1];
            let clitic = &caps[2];
            let split = if clitic == "y" {
                format!("{base} le")
            } else {
                format!("{base} {clitic}")
            };
            events.push(Rewrite::replaced(&caps[0], split.as_str(), "CLITIC_SPLIT"));
            split
        })
        .into_owned()
}

static CLITIC_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("ys", "les"),
        ("yos", "les"),
        ("ylo", "se lo"),
        ("ylu", "se lo"),
        ("yla", "se la"),
        ("ylos", "se los"),
        ("yles", "se les"),
        ("se-y", "se le"),
        ("no-y", "no le"),
        ("no-yos", "no les"),
    ]
    .into_iter()
    .collect()
});

static BASE_VARIANTS: &[(&str, &str)] = &[
    // filler unification
    ("eeh", "eh"),
    ("ehh", "eh"),
    ("mhm", "mm"),
    ("mh", "mm"),
    ("mmhm", "mm"),
    ("mmh", "mm"),
    ("mmj", "mm"),
    ("mjmj", "mm"),
    ("mmjm", "mm"),
    ("mmm", "mm"),
    ("mmajá", "ajá"),
    ("majám", "ajá"),
    ("uhm", "mm"),
    // lexical variants
    ("Caponeta", "Acaponeta"),
    ("caponeta", "Acaponeta"),
    ("Dio", "Dios"),
    ("Prancisco", "Francisco"),
    ("aques", "aquellos"),
    ("acompeña", "acompañar"),
    ("albaciles", "alguaciles"),
    ("albaniles", "albañiles"),
    ("amos", "vamos"),
    ("ansí", "así"),
    ("asín", "así"),
    ("aiá", "allá"),
    ("allís", "allí"),
    ("bichol", "huichol"),
    ("bicholes", "huicholes"),
    ("bindicir", "bendecir"),
    ("ca", "acá"),
    ("cai", "casi"),
    ("castoilla", "castellano"),
    ("chapilote", "zapilote"),
    ("cemos", "hacemos"),
    ("ciendo", "haciendo"),
    ("cendo", "haciendo"),
    ("cimos", "hicimos"),
    ("com", "como"),
    ("comence", "comience"),
    ("comunida", "comunidad"),
    ("conpesó", "confesó"),
    ("costumbraban", "acostumbraban"),
    ("cutsillo", "cuchillo"),
    ("depué", "después"),
    ("despue", "después"),
    ("dicimos", "decimos"),
    ("dihe", "dije"),
    ("disde", "dice"),
    ("enamorao", "enamorado"),
    ("encalgales", "encargarles"),
    ("enperma", "enferma"),
    ("enpermeda", "enfermedad"),
    ("enpermedad", "enfermedad"),
    ("enpermo", "enfermo"),
    ("entoces", "entonces"),
    ("entoe", "entonces"),
    ("entonce", "entonces"),
    ("entós", "entonces"),
    ("etons", "entonces"),
    ("estem", "este"),
    ("esteem", "este"),
    ("estee", "este"),
    ("eza", "reza"),
    ("gonbernador", "gobernador"),
    ("guanador", "gobernador"),
    ("haiga", "haya"),
    ("ieva", "lleva"),
    ("icían", "hacían"),
    ("il", "el"),
    ("in", "un"),
    ("inglesia", "iglesia"),
    ("iinterrupción", "interrupción"),
    ("ire", "mire"),
    ("jardincinto", "jardincito"),
    ("jue", "fue"),
    ("jueices", "jueces"),
    ("jui", "fui"),
    ("juera", "fuera"),
    ("jultimo", "último"),
    ("júltimo", "último"),
    ("lapi", "lápiz"),
    ("lleaba", "llegaba"),
    ("lugai", "lugar"),
    ("luigo", "luego"),
    ("má", "más"),
    ("namás", "nada más"),
    ("madados", "mandados"),
    ("manece", "amanece"),
    ("manecía", "amanecía"),
    ("maneciste", "amaneciste"),
    ("máiz", "maíz"),
    ("mitá", "mitad"),
    ("nai", "nada"),
    ("necetamos", "necesitamos"),
    ("necetando", "necesitando"),
    ("necita", "necesita"),
    ("nomas", "nomás"),
    ("nosotro", "nosotros"),
    ("ntonce", "entonces"),
    ("onde", "donde"),
    ("ora", "ahora"),
    ("orita", "ahorita"),
    ("pa", "para"),
    ("pal", "para el"),
    ("pamilia", "familia"),
    ("pagres", "padres"),
    ("páctica", "práctica"),
    ("pladores", "bailadores"),
    ("preciosia", "preciosa"),
    ("piensaran", "pensaran"),
    ("plticale", "platicarle"),
    ("pol", "por el"),
    ("poní", "ponía"),
    ("porma", "forma"),
    ("pormó", "formó"),
    ("pos", "pues"),
    ("ps", "pues"),
    ("pu", "pues"),
    ("pue", "pues"),
    ("pus", "pues"),
    ("quera", "quiera"),
    ("quere", "quiere"),
    ("radiofusora", "radiodifusora"),
    ("restirado", "retirado"),
    ("semes", "somos"),
    ("sotros", "nosotros"),
    ("stá", "está"),
    ("stás", "estás"),
    ("stámos", "estamos"),
    ("stába", "estaba"),
    ("stamos", "estamos"),
    ("stemos", "estamos"),
    ("tás", "estás"),
    ("talos", "palos"),
    ("taba", "estaba"),
    ("taban", "estaban"),
    ("tamos", "estamos"),
    ("tambié", "también"),
    ("tepahuano", "tepehuano"),
    ("tepehuan", "tepehuano"),
    ("tepehuno", "tepehuano"),
    ("toce", "entonces"),
    ("too", "todo"),
    ("tons", "entonces"),
    ("tonses", "entonces"),
    ("traime", "tráeme"),
    ("trasporte", "transporte"),
    ("tsostsil", "tsotsil"),
    ("uté", "usted"),
    ("uste", "usted"),
    ("veincinco", "veinticinco"),
    ("velda", "verdad"),
    ("verda", "verdad"),
    ("verdat", "verdad"),
    ("verdak", "verdad"),
    ("vinía", "venía"),
];

static ASTURIAN_VARIANTS: &[(&str, &str)] = &[
    ("asturianu", "asturiano"),
    ("acuérdome", "acuerdo me"),
    ("diz", "dice"),
    ("dizme", "dice me"),
    ("hai", "hay"),
    ("sitiu", "sitio"),
    ("Grao", "Grado"),
    ("tamién", "también"),
    ("enseñatelo", "enseñar te lo"),
    ("conócesla", "conoces la"),
    ("retomala", "retomar la"),
    ("enfadóse", "enfadó se"),
    ("listu", "listo"),
    ("cerrao", "cerrado"),
    ("estraña", "extraña"),
    ("estráñame", "extraña me"),
    ("coses", "cosas"),
    ("agacháu", "agachado"),
    ("levantóse", "levantó se"),
    ("lesionao", "lesionado"),
    ("fios", "hijos"),
    ("jubilaos", "jubilados"),
    ("desorientáu", "desorientado"),
    ("achacábalo", "achacaba lo"),
    ("preguntame", "preguntar me"),
    ("quitao", "quitado"),
    ("quier", "quiere"),
    ("parecióme", "pareció me"),
    ("dijéronme", "dijeron me"),
    ("revueltu", "revuelto"),
    ("esti", "este"),
    ("agobiao", "agobiado"),
    ("jubilao", "jubilado"),
    ("esplotaran", "explotaran"),
    ("ruidu", "ruido"),
    ("tomólo", "tomó lo"),
    ("afectábalu", "afectaba lo"),
    ("acuerdaste", "acuerdas te"),
    ("mezclalo", "mezclar lo"),
    ("hablao", "hablado"),
    ("llamalo", "llamarlo"),
    ("tallao", "tallado"),
    ("trabayar", "trabajar"),
    ("piénsolo", "pienso lo"),
    ("aglutinalos", "aglutinarlos"),
    ("contabilidá", "contabilidad"),
    ("paisanu", "paisano"),
    ("vendíate", "vendía te"),
    ("pieces", "piezas"),
    ("queríala", "quería la"),
    ("complicáu", "complicado"),
    ("apretáu", "apretado"),
    ("Facultá", "Facultad"),
    ("Universidá", "Universidad"),
    ("salú", "salud"),
    ("acabase", "acabar se"),
    ("cachucu", "cachuco"),
    ("usté", "usted"),
    ("envede", "en vez de"),
    ("contestualizar", "contextualizar"),
    ("limitao", "limitado"),
    ("déjame", "deja me"),
    ("mandóme", "mandó me"),
    ("llamao", "llamado"),
    ("gústanme", "gustan me"),
    ("préstame", "presta me"),
    ("facer", "hacer"),
    ("gatucu", "gatuco"),
    ("preséntate", "presenta te"),
    ("gústame", "gusta me"),
    ("casáu", "casado"),
    ("préstasme", "prestas me"),
    ("casame", "casarme"),
    ("esactamente", "exactamente"),
    ("engurruñao", "engurruñado"),
    ("púseme", "puse me"),
    ("liao", "liado"),
    ("puqitín", "poquitín"),
    ("fae", "hace"),
    ("vémonos", "vemos nos"),
    ("prestábanos", "prestaba nos"),
    ("prao", "prado"),
    ("tuyu", "tuyo"),
    ("toa", "toda"),
    ("hacemelo", "hacer me lo"),
    ("perderíalo", "perdería lo"),
    ("préstesme", "prestas me"),
    ("apurao", "apurado"),
    ("neso", "en eso"),
    ("estoi", "estoy"),
    ("laos", "lados"),
    ("ónde", "dónde"),
    ("trabayando", "trabajando"),
    ("decítelo", "decir te lo"),
    ("perdístelo", "perdiste lo"),
    ("amestalo", "amestar lo"),
    ("encargao", "encargado"),
    ("vendíatelo", "vendía te lo"),
    ("mineru", "minero"),
    ("dale", "dar le"),
    ("capacidá", "capacidad"),
    ("mezclase", "mezclar se"),
    ("faciendo", "haciendo"),
    ("sentáu", "sentado"),
    ("nel", "en el"),
    ("dedicóse", "dedicó se"),
    ("talles", "tallas"),
    ("añu", "año"),
    ("ponelos", "poner los"),
    ("ponse", "pone se"),
    ("púsose", "puso se"),
    ("ponelu", "ponerlo"),
    ("doi", "doy"),
    ("nun", "no"),
    ("ta", "está"),
    ("tas", "estás"),
    ("esi", "ese"),
    ("tábamos", "estábamos"),
    ("navidá", "Navidad"),
    ("tabas", "estabas"),
    ("tando", "estando"),
    ("llámase", "llama se"),
    ("toy", "estoy"),
    ("tovía", "todavía"),
    ("pa", "para"),
    ("polo", "por lo"),
    ("mismu", "mismo"),
    ("lao", "lado"),
    ("home", "hombre"),
    ("espediente", "expediente"),
    ("cuidao", "cuidado"),
    ("amigu", "amigo"),
    ("ensi", "así"),
    ("taluego", "hasta luego"),
    ("quies", "quieres"),
    ("quie", "quiere"),
    ("recao", "recado"),
    ("supermercao", "supermercado"),
    ("vien", "viene"),
    ("comprámosla", "compramos la"),
    ("habíase", "había se"),
    ("acesu", "acceso"),
    ("proyectu", "proyecto"),
    ("ponese", "poner se"),
    ("dedicame", "dedicar me"),
    ("mudámonos", "mudamos nos"),
    ("arroxar", "enrojar"),
    ("maestru", "maestro"),
    ("ayuntamientu", "ayuntamiento"),
    ("hacelo", "hacer lo"),
    ("muchu", "mucho"),
    ("acostumbrao", "acostumbrado"),
    ("dentru", "dentro"),
    ("hacese", "hacerse"),
    ("conceyu", "concejo"),
    ("piquiñucu", "pequeñuco"),
    ("decite", "decir te"),
    ("arreglala", "arreglar la"),
    ("enséñotela", "enseño te la"),
    ("vaciala", "vaciar la"),
    ("voluntá", "voluntad"),
    ("forno", "horno"),
    ("muyeres", "mujeres"),
    ("vaciáronse", "vaciaron se"),
    ("bañu", "baño"),
    ("val", "vale"),
    ("probe", "pobre"),
    ("paisa", "paisano"),
    ("calidá", "calidad"),
    ("nuna", "ninguna"),
    ("verdá", "verdad"),
    ("agusto", "a gusto"),
    ("guapu", "guapo"),
    ("esagerao", "exagerado"),
    ("otru", "otro"),
    ("bai", "vas"),
    ("vais", "van"),
    ("operalo", "operar lo"),
    ("ingresao", "ingresado"),
    ("lu", "lo"),
    ("yáa", "ya"),
    ("to", "todo"),
    ("tolo", "todo lo"),
    ("toos", "todos"),
    ("tol", "todo el"),
    ("tolos", "todos los"),
    ("tola", "toda la"),
    ("toles", "todas las"),
    ("dau", "dado"),
    ("preciu", "precio"),
    ("quedábame", "quedaba me"),
    ("cáesme", "caes me"),
    ("xente", "gente"),
    ("liáo", "liado"),
    ("tará", "estará"),
    ("tar", "estar"),
    ("taré", "estaré"),
    ("bebu", "bebo"),
    ("fíos", "hijos"),
    ("cachu", "cacho"),
    ("anillu", "anillo"),
    ("entós", "entonces"),
    ("amás", "además"),
    ("tiénenlo", "tienen lo"),
    ("tiénen", "tienen"),
    ("tien", "tiene"),
    ("tienlo", "tiene lo"),
    ("tán", "están"),
    ("tá", "está"),
    ("ye", "es"),
    ("yes", "eres"),
    ("yera", "era"),
    ("na", "nada"),
    ("ná", "nada"),
    ("puea", "pueda"),
    ("paezme", "parece me"),
    ("paez", "parece"),
    ("pallá", "para allá"),
    ("pola", "por la"),
    ("polos", "por los"),
    ("peles", "por las"),
    ("pal", "para el"),
    ("díxome", "dijo me"),
    ("dixéronme", "dijeron me"),
    ("dígo-te", "digo te"),
    ("dígote", "digo te"),
    ("acondicionaos", "acondicionados"),
    ("separaos", "separados"),
    ("cagon", "cago en"),
];

static BASE_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BASE_VARIANTS.iter().copied().collect());

static ASTURIAN_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ASTURIAN_VARIANTS.iter().copied().collect());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::testing::SetOracle;
    use crate::engine::pipeline::RuleContext;
    use crate::vocab::Vocabulary;

    fn run(text: &str, dialect: DialectProfile) -> Rewritten {
        let oracle = SetOracle::new(&[]);
        let vocabulary = Vocabulary::new();
        let ctx = RuleContext { oracle: &oracle, vocabulary: &vocabulary, dialect };
        apply(text, &ctx)
    }

    #[test]
    fn base_map_applies_everywhere() {
        assert_eq!(run("pos ya verda", DialectProfile::Neutral).text, "pues ya verdad");
        assert_eq!(run("pos ya verda", DialectProfile::Asturian).text, "pues ya verdad");
    }

    #[test]
    fn asturian_map_needs_the_profile() {
        assert_eq!(run("los fíos grandes", DialectProfile::Asturian).text, "los hijos grandes");
        assert_eq!(run("los fíos grandes", DialectProfile::Neutral).text, "los fíos grandes");
    }

    #[test]
    fn asturian_overrides_base() {
        // `pa` maps in both tables; the Asturian entry wins under the profile.
        assert_eq!(run("pa casa", DialectProfile::Asturian).text, "para casa");
    }

    #[test]
    fn clitic_splitting() {
        assert_eq!(run("contó-y todo", DialectProfile::Asturian).text, "contó le todo");
        assert_eq!(run("dixo-ys eso", DialectProfile::Asturian).text, "dixo les eso");
        assert_eq!(run("contó-y todo", DialectProfile::Neutral).text, "contó-y todo");
    }

    #[test]
    fn colon_adjacent_tokens_are_exempt() {
        assert_eq!(run("pos: bien", DialectProfile::Neutral).text, "pos: bien");
    }

    #[test]
    fn dialect_profile_from_file_id() {
        assert_eq!(DialectProfile::from_file_id("014_abc.txt"), DialectProfile::Asturian);
        assert_eq!(DialectProfile::from_file_id("003_abc.txt"), DialectProfile::Neutral);
    }
}
