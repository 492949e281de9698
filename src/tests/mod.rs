mod nfr;
