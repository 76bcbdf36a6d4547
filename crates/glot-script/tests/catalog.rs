//! Integration tests for writing whole catalogs

use std::sync::Arc;

use glot::{Dialect, Engine, Language, MemorySource};
use glot_script::{Catalog, MappingRole, ScriptError, ScriptGenerator};
use insta::assert_snapshot;

fn shop_catalog() -> Catalog<'static> {
    let dialect = Dialect::standard();
    let mut catalog = Catalog::builder()
        .name("texts")
        .language(Language::parse("en").unwrap())
        .include_runtime(false)
        .build();
    catalog.compile(&dialect, "", "Title", "Store").unwrap();
    catalog.compile(&dialect, "", "Greeting", "Hello {Name}").unwrap();
    catalog.compile(&dialect, "", "Shout", "{Name:uc}!").unwrap();
    catalog.compile(&dialect, "shop", "Motto", "(open)").unwrap();
    catalog
}

#[test]
fn test_catalog_script() {
    let mut script = String::new();
    let missing = ScriptGenerator::standard()
        .write_catalog(&shop_catalog(), &mut script)
        .unwrap();
    assert!(missing.is_empty());
    assert_snapshot!(script, @r##"
    var texts=new Glot.TextManager("",{"name":"en","decimal":".","group":","},true,function(m,sw,dv,e,af,val,rp,sf){
    function _lc(s){return s.toLocaleLowerCase(m.culture.name||undefined);}
    function _uc(s){return s.toLocaleUpperCase(m.culture.name||undefined);}
    function _cf(s){return s===""?s:_uc(s.charAt(0))+_lc(s.substring(1));}
    function _ca(s){return s.split(" ").map(_cf).join(" ");}
    return {
    "0Title":"Store",
    "1Greeting":function(c){return [e("Hello "),(function(){var v=c.g("Name");return af(v,dv(v),true);})()].join('');},
    "1Shout":function(c){return [(function(){var v=c.g("Name");return af(v,_uc(dv(v)),true);})(),e("!")].join('');},
    "0shop__Motto":"(open)"
    };
    });
    "##);
}

#[test]
fn test_runtime_is_included_by_default() {
    let dialect = Dialect::standard();
    let mut catalog = Catalog::builder().name("t").build();
    catalog.compile(&dialect, "", "A", "a").unwrap();

    let mut script = String::new();
    ScriptGenerator::standard().write_catalog(&catalog, &mut script).unwrap();
    assert!(script.starts_with("var Glot=Glot||{};"));
    assert!(script.contains("G.TextManager=function("));
    assert!(script.contains("var t=new Glot.TextManager(\"\",{\"name\":\"\",\"decimal\":\".\",\"group\":\",\"},true,"));
}

#[test]
fn test_catalog_reports_missing_mappings_once() {
    let dialect = Dialect::standard();
    let mut catalog = Catalog::builder().name("t").include_runtime(false).build();
    catalog.compile(&dialect, "", "A", "{N:roman}").unwrap();
    catalog.compile(&dialect, "", "B", "#N{one: a | b} {M:roman}").unwrap();

    let mut script = String::new();
    let missing = ScriptGenerator::standard().write_catalog(&catalog, &mut script).unwrap();
    let roles: Vec<(MappingRole, &str)> = missing.iter().map(|mapping| (mapping.role, mapping.kind)).collect();
    assert_eq!(
        roles,
        vec![
            (MappingRole::ValueFormatter, "RomanFormatter"),
            (MappingRole::SwitchCondition, "PluralCondition"),
        ]
    );
    assert!(script.contains(r#""1A":function(c){return ["Missing ValueFormatter: RomanFormatter\n"].join('');}"#));
}

#[test]
fn test_catalog_inlines_lookup_conditions() {
    let source = MemorySource::new().with("", "Few", "", "[2,4]");
    let engine = Engine::builder().source(Arc::new(source)).build();
    let dialect = Dialect::standard();
    let mut catalog = Catalog::builder()
        .name("t")
        .lookup(&engine)
        .include_runtime(false)
        .build();
    catalog.compile(&dialect, "", "A", "#N{@Few: few | many}").unwrap();

    let mut script = String::new();
    ScriptGenerator::standard().write_catalog(&catalog, &mut script).unwrap();
    assert!(script.contains("return ((+v1>=2&&+v1<=4)||v2!==undefined&&(+v2>=2&&+v2<=4))?e(\"few\")"));
}

#[test]
fn test_compile_error_names_the_entry() {
    let mut catalog = Catalog::builder().name("t").build();
    let error = catalog
        .compile(&Dialect::standard(), "shop", "Broken", "{Name")
        .unwrap_err();
    assert!(matches!(error, ScriptError::Compile { ref key, .. } if key == "shop/Broken"));
    assert!(catalog.entries().is_empty());
}
