//! The JavaScript runtime that generated catalogs call into.
//!
//! Generated functions receive the runtime helpers as arguments of the
//! catalog factory: `m` (the text manager), `sw` (switch), `dv` (default
//! formatting), `e` (encoder), `af` (apply wrapping), `val` (raw value),
//! `rp` (property path) and `sf` (format string).
//!
//! Values passed around at runtime are either plain JavaScript values or
//! wrappers `{_glot:true,val:...}` carrying `unencoded`, `template` and
//! `defaultFormat` markers, mirroring `ParameterValue`.

/// Names of the factory arguments, in order.
pub(crate) const FACTORY_ARGUMENTS: &str = "m,sw,dv,e,af,val,rp,sf";

pub(crate) const RUNTIME: &str = r##"var Glot=Glot||{};
(function(G){
function val(v){return v!=null&&v._glot?v.val:v;}
function wrap(v){return v!=null&&v._glot?v:{_glot:true,val:v};}
function html(s){return (""+s).replace(/&/g,"&amp;").replace(/</g,"&lt;").replace(/>/g,"&gt;").replace(/"/g,"&quot;").replace(/'/g,"&#39;");}
function plain(v){v=val(v);if(v==null)return "";if(Array.isArray(v)){var a=[];for(var i=0;i<v.length;i++)a.push(plain(v[i]));return a.join(", ");}return ""+v;}
function dv(v){return v!=null&&v._glot&&v.defaultFormat?v.defaultFormat(v):plain(v);}
function span(ms,p){var t={totaldays:864e5,totalhours:36e5,totalminutes:6e4,totalseconds:1e3,totalmilliseconds:1};if(p in t)return ms/t[p];
var u={days:[864e5,Infinity],hours:[36e5,24],minutes:[6e4,60],seconds:[1e3,60],milliseconds:[1,1e3]};if(p in u)return Math.floor(ms/u[p][0])%u[p][1];return null;}
function rp(o,ps){var v=val(o);for(var i=0;i<ps.length&&v!=null;i++){var l=ps[i].toLowerCase(),n=null;
if(typeof v==="object"&&!Array.isArray(v)){for(var k in v)if(k.toLowerCase()===l){n=val(v[k]);break;}}
if(n==null&&(l==="length"||l==="count")&&(typeof v==="string"||Array.isArray(v)))n=v.length;
if(n==null&&typeof v==="number")n=span(v,l);
v=n;}return v;}
function Params(args,ns){var layers=[{}];for(var k in args)if(Object.prototype.hasOwnProperty.call(args,k))layers[0][k.toLowerCase()]=args[k];
return {n:ns,g:function(n){n=n.toLowerCase();for(var i=layers.length-1;i>=0;i--)if(n in layers[i])return layers[i][n];return null;},
s:function(n,v){layers[layers.length-1][n.toLowerCase()]=v;},push:function(){layers.push({});},pop:function(){layers.pop();}};}
function sw(c,v,none,format,cases){var x=val(v);if(x==null)return none?none():"";c.push();var r;
try{if(Array.isArray(x)){var parts=[];for(var i=0;i<x.length;i++){var item=wrap(x[i]);if(v.defaultFormat&&!item.defaultFormat)item={_glot:true,val:item.val,defaultFormat:v.defaultFormat};
c.s("#",format?{_glot:true,val:format(item),unencoded:true}:item);c.s("#Index",i+1);parts.push(cases(i,i-x.length));}r=parts.join("");}
else{c.s("#",format?{_glot:true,val:format(v),unencoded:true}:v);r=cases(x);}}finally{c.pop();}return r;}
G.TextManager=function(ns0,culture,encode,factory){
var e=encode?function(s){return s==null?"":html(s);}:function(s){return s==null?"":""+s;};
function af(v,f,enc){if(v!=null&&v._glot){if(v.unencoded)return f;if(v.template!=null)return v.template.split("{#}").join(e(f));}return enc?e(f):f;}
function sf(f,v){if(typeof v!=="number")return plain(v);var p=/^([NnFfPpDd])(\d*)$/.exec(f);if(!p)return ""+v;
var l=p[1].toUpperCase(),d=p[2]===""?(l==="D"?0:2):+p[2];
if(l==="D"){var s=""+Math.abs(Math.trunc(v));while(s.length<d)s="0"+s;return (v<0?"-":"")+s;}
var o={minimumFractionDigits:d,maximumFractionDigits:d,useGrouping:l!=="F"};if(l==="P")o.style="percent";
return new Intl.NumberFormat(culture.name||undefined,o).format(v);}
var texts,m={culture:culture};
m.unencoded=function(v){return v==null?null:{_glot:true,val:v,unencoded:true};};
m.withFormat=function(v,f){var w=wrap(v);return {_glot:true,val:w.val,unencoded:w.unencoded,template:w.template,defaultFormat:function(x){return f(val(x));}};};
m.get=function(key,args,ns){ns=ns==null?ns0:ns;var q=ns===ns0?key:ns+"__"+key;var t=texts["1"+q];
if(t)return t(Params(args||{},ns));t=texts["0"+q];return t==null?null:e(t);};
texts=factory(m,sw,dv,e,af,val,rp,sf);
return m;};
})(Glot);
"##;
